//! HTTP Server configuration and startup.

use std::sync::Arc;

use axum::{
    Router, middleware,
    routing::{delete, get, post, put},
};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use contacts_types::{AvatarStore, ContactRepository};

use super::auth::auth_middleware;
use super::handlers::{self, AppState};
use super::rate_limit::{RateLimiterState, rate_limit_middleware};
use crate::ContactService;
use crate::auth::TokenKeys;
use crate::openapi::ApiDoc;

/// HTTP Server for the Contacts API.
pub struct HttpServer<R: ContactRepository, A: AvatarStore> {
    state: Arc<AppState<R, A>>,
    tokens: Arc<TokenKeys>,
    rate_limiter: Arc<RateLimiterState>,
}

impl<R: ContactRepository, A: AvatarStore> HttpServer<R, A> {
    /// Creates a new HTTP server with the given service and token keys.
    pub fn new(service: ContactService<R, A>, tokens: TokenKeys) -> Self {
        let tokens = Arc::new(tokens);
        Self {
            state: Arc::new(AppState {
                service,
                tokens: tokens.clone(),
            }),
            tokens,
            rate_limiter: Arc::new(RateLimiterState::default()), // 100 req/min default
        }
    }

    /// Creates a new HTTP server with custom rate limiting.
    pub fn with_rate_limit(
        service: ContactService<R, A>,
        tokens: TokenKeys,
        requests_per_minute: u32,
    ) -> Self {
        use std::time::Duration;
        let tokens = Arc::new(tokens);
        Self {
            state: Arc::new(AppState {
                service,
                tokens: tokens.clone(),
            }),
            tokens,
            rate_limiter: Arc::new(RateLimiterState::new(
                requests_per_minute,
                Duration::from_secs(60),
            )),
        }
    }

    /// Builds the Axum router with all routes.
    pub fn router(&self) -> Router {
        Router::new()
            .route("/health", get(handlers::health))
            .route("/auth/token", post(handlers::issue_token::<R, A>))
            .route("/api/contacts", post(handlers::create_contact::<R, A>))
            .route("/api/contacts", get(handlers::list_contacts::<R, A>))
            .route(
                "/api/contacts/birthdays",
                get(handlers::upcoming_birthdays::<R, A>),
            )
            .route("/api/contacts/{id}", get(handlers::get_contact::<R, A>))
            .route("/api/contacts/{id}", put(handlers::update_contact::<R, A>))
            .route(
                "/api/contacts/{id}",
                delete(handlers::delete_contact::<R, A>),
            )
            .route("/api/users/me/avatar", put(handlers::upload_avatar::<R, A>))
            .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
            .layer(middleware::from_fn_with_state(
                self.rate_limiter.clone(),
                rate_limit_middleware,
            ))
            .layer(middleware::from_fn_with_state(
                self.tokens.clone(),
                auth_middleware,
            ))
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Runs the server on the given address with graceful shutdown.
    pub async fn run(self, addr: &str) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("Server listening on {}", listener.local_addr()?);

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown...");
}
