//! Server configuration loaded from the environment

use std::env;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Clone)]
pub struct Config {
    /// PostgreSQL connection string (required)
    pub database_url: String,
    /// HTTP listen port
    pub http_port: u16,
    /// Shared secret for payment webhook signature verification
    pub webhook_secret: String,
    /// Deployment environment: "development" or "production"
    pub environment: String,
}

impl Config {
    pub fn from_env() -> Result<Self, BoxError> {
        let environment =
            env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        let database_url =
            env::var("DATABASE_URL").map_err(|_| "DATABASE_URL must be set")?;

        let http_port = env::var("HTTP_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse::<u16>()
            .map_err(|_| "HTTP_PORT must be a valid port number")?;

        let webhook_secret = Self::require_secret("WEBHOOK_SECRET", &environment)?;

        Ok(Self {
            database_url,
            http_port,
            webhook_secret,
            environment,
        })
    }

    /// Read a secret from the environment.
    ///
    /// In production the variable is mandatory; in development a
    /// predictable fallback keeps local setup friction-free.
    fn require_secret(name: &str, environment: &str) -> Result<String, BoxError> {
        match env::var(name) {
            Ok(value) if !value.is_empty() => Ok(value),
            _ if environment == "production" => {
                Err(format!("{name} must be set in production").into())
            }
            _ => {
                tracing::warn!("{name} not set, using development default");
                Ok(format!("dev_{}", name.to_lowercase()))
            }
        }
    }
}
