//! Bulk-load the ingredient catalogue from a JSON file.
//!
//! ```bash
//! DATABASE_URL=postgres://... load-ingredients --path data/ingredients.json
//! ```
//!
//! The file holds an array of `{"name": ..., "measurement_unit": ...}` objects.
//! Pairs that already exist are left untouched, so the command can be re-run.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use sea_orm::Database;
use tracing::info;

use foodgram_core::tracing::init_tracing;
use foodgram_recipes::infra::db::DbIngredientRepository;
use foodgram_recipes::usecase::ingredient::{IngredientInput, LoadIngredientsUseCase};

#[derive(Parser)]
#[command(about = "Load ingredients from a JSON file into the database")]
struct Args {
    /// JSON file with the ingredient list
    #[arg(long)]
    path: PathBuf,

    /// Database URL (falls back to DATABASE_URL)
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let raw = std::fs::read_to_string(&args.path)
        .with_context(|| format!("read {}", args.path.display()))?;
    let items: Vec<IngredientInput> =
        serde_json::from_str(&raw).with_context(|| format!("parse {}", args.path.display()))?;

    let db = Database::connect(&args.database_url)
        .await
        .context("connect to database")?;

    let uc = LoadIngredientsUseCase {
        repo: DbIngredientRepository { db: Arc::new(db) },
    };
    let report = uc.execute(items).await?;

    info!(
        created = report.created,
        existing = report.existing,
        "ingredients loaded"
    );
    Ok(())
}
