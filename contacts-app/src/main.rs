//! # Contacts Application
//!
//! Binary that wires together all the components:
//! - Load configuration from environment
//! - Initialize the repository and avatar adapters
//! - Create the contact service
//! - Start the HTTP server

mod config;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use contacts_hex::{ContactService, auth::TokenKeys, inbound::HttpServer};
use contacts_repo::{ImageHost, build_repo};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,contacts_app=debug,contacts_hex=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = config::Config::from_env()?;

    tracing::info!("Starting contacts server on port {}", config.port);
    tracing::info!("Using database: {}", config.database_url);

    // Build repository (handles connection and migration)
    let repo = build_repo(&config.database_url).await?;

    // External image host for avatar uploads
    let avatars = ImageHost::new(config.avatar_upload_url.clone(), config.avatar_api_key.clone());

    // Create the contact service
    let service = ContactService::new(repo, avatars);

    // Token keys for bearer authentication
    let tokens = TokenKeys::new(&config.jwt_secret, config.token_ttl_secs);

    // Create and run the HTTP server
    let server = HttpServer::with_rate_limit(service, tokens, config.rate_limit_per_minute);
    let addr = format!("0.0.0.0:{}", config.port);

    server.run(&addr).await?;

    Ok(())
}
