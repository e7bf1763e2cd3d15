use anyhow::Result;

use foodgram_core::config::{parse_or, required};

/// Recipes service configuration loaded from environment variables.
#[derive(Debug)]
pub struct RecipesConfig {
    /// PostgreSQL connection URL. Env var: `DATABASE_URL`.
    pub database_url: String,
    /// TCP port for the HTTP server (default 3114). Env var: `RECIPES_PORT`.
    pub recipes_port: u16,
}

impl RecipesConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            database_url: required("DATABASE_URL")?,
            recipes_port: parse_or("RECIPES_PORT", 3114)?,
        })
    }
}
