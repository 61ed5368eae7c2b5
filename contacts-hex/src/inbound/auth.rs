//! Authentication middleware for bearer token validation.

use std::sync::Arc;

use axum::{
    Json,
    body::Body,
    extract::State,
    http::{Request, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::auth::TokenKeys;

/// Extracts the token from the Authorization header.
/// Expected format: "Bearer <token>"
fn extract_bearer(auth_header: Option<&str>) -> Option<&str> {
    auth_header?.strip_prefix("Bearer ")
}

/// Paths that bypass authentication and rate limiting.
pub(crate) fn is_public(path: &str) -> bool {
    path == "/health"
        || path == "/auth/token"
        || path.starts_with("/swagger-ui")
        || path.starts_with("/api-docs")
}

/// Authentication middleware that validates bearer tokens.
///
/// This middleware:
/// 1. Extracts the token from the Authorization header
/// 2. Verifies the JWT signature and expiry
/// 3. Inserts the resolved `CurrentUser` as a request extension
/// 4. Returns 401 Unauthorized if validation fails
pub async fn auth_middleware(
    State(keys): State<Arc<TokenKeys>>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    if is_public(request.uri().path()) {
        return next.run(request).await;
    }

    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    let token = match extract_bearer(auth_header) {
        Some(token) if !token.is_empty() => token,
        _ => {
            return unauthorized_response("Missing or invalid Authorization header");
        }
    };

    match keys.verify(token) {
        Ok(user) => {
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Err(_) => unauthorized_response("Could not validate credentials"),
    }
}

fn unauthorized_response(message: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        [(header::WWW_AUTHENTICATE, "Bearer")],
        Json(serde_json::json!({
            "error": message,
            "code": 401
        })),
    )
        .into_response()
}
