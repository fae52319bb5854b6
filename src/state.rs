use std::sync::Arc;

use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::{
    config::AppConfig,
    llm::{CompletionClient, OpenAiClient},
};

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Arc<AppConfig>,
    pub ai: Arc<dyn CompletionClient>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);

        let db = PgPoolOptions::new()
            .max_connections(10)
            .connect(&config.database_url)
            .await
            .context("connect to database")?;

        let ai = Arc::new(OpenAiClient::new(&config.ai)) as Arc<dyn CompletionClient>;

        Ok(Self { db, config, ai })
    }

    pub fn from_parts(db: PgPool, config: Arc<AppConfig>, ai: Arc<dyn CompletionClient>) -> Self {
        Self { db, config, ai }
    }
}
