//! Configuration loading from environment.

use std::env;

/// Application configuration.
pub struct Config {
    pub port: u16,
    pub database_url: String,
    pub jwt_secret: String,
    pub token_ttl_secs: u64,
    pub rate_limit_per_minute: u32,
    pub avatar_upload_url: String,
    pub avatar_api_key: Option<String>,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()?;

        let database_url = env::var("DATABASE_URL")
            .map_err(|_| anyhow::anyhow!("DATABASE_URL environment variable is required"))?;

        let jwt_secret = env::var("JWT_SECRET")
            .map_err(|_| anyhow::anyhow!("JWT_SECRET environment variable is required"))?;

        let token_ttl_secs = env::var("TOKEN_TTL_SECS")
            .unwrap_or_else(|_| "3600".to_string())
            .parse()?;

        let rate_limit_per_minute = env::var("RATE_LIMIT_PER_MINUTE")
            .unwrap_or_else(|_| "100".to_string())
            .parse()?;

        let avatar_upload_url = env::var("AVATAR_UPLOAD_URL")
            .map_err(|_| anyhow::anyhow!("AVATAR_UPLOAD_URL environment variable is required"))?;

        let avatar_api_key = env::var("AVATAR_API_KEY").ok();

        Ok(Self {
            port,
            database_url,
            jwt_secret,
            token_ttl_secs,
            rate_limit_per_minute,
            avatar_upload_url,
            avatar_api_key,
        })
    }
}
