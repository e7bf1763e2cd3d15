use anyhow::Context;
use sea_orm::Database;
use tracing::info;

use foodgram_core::tracing::init_tracing;
use foodgram_recipes::config::RecipesConfig;
use foodgram_recipes::router::build_router;
use foodgram_recipes::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = RecipesConfig::from_env().context("load recipes config")?;

    let db = Database::connect(&config.database_url)
        .await
        .context("connect to database")?;

    let router = build_router(AppState::new(db));
    let http_addr = format!("0.0.0.0:{}", config.recipes_port);
    let listener = tokio::net::TcpListener::bind(&http_addr)
        .await
        .with_context(|| format!("bind {http_addr}"))?;

    info!("recipes service listening on {http_addr}");
    axum::serve(listener, router).await.context("server error")?;
    Ok(())
}
