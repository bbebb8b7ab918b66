//! Shared application state

use sqlx::PgPool;

use crate::config::Config;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    /// Secret used to verify payment webhook signatures
    pub webhook_secret: String,
}

impl AppState {
    pub async fn new(config: &Config) -> Result<Self, BoxError> {
        let pool = PgPool::connect(&config.database_url).await?;

        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("Database migrations applied");

        Ok(Self {
            pool,
            webhook_secret: config.webhook_secret.clone(),
        })
    }
}
