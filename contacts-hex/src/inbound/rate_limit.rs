//! Rate limiting middleware using Governor.
//!
//! Implements per-user rate limiting with a token bucket algorithm, keyed by
//! the authenticated email resolved by the auth middleware.

use axum::{
    Json,
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use dashmap::DashMap;
use governor::{
    Quota, RateLimiter,
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
};
use serde_json::json;
use std::{num::NonZeroU32, sync::Arc, time::Duration};

use super::auth::is_public;
use crate::auth::CurrentUser;

/// Rate limiter state shared across requests.
pub struct RateLimiterState {
    /// Per-user rate limiters
    limiters: DashMap<String, Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>>,
    /// Default quota for new identities
    quota: Quota,
}

impl Default for RateLimiterState {
    fn default() -> Self {
        Self::new(100, Duration::from_secs(60))
    }
}

impl RateLimiterState {
    /// Creates a new rate limiter state.
    ///
    /// # Arguments
    /// * `requests` - Number of requests allowed per period
    /// * `period` - Time period for the quota
    pub fn new(requests: u32, period: Duration) -> Self {
        let quota = Quota::with_period(period)
            .unwrap()
            .allow_burst(NonZeroU32::new(requests).unwrap());

        Self {
            limiters: DashMap::new(),
            quota,
        }
    }

    /// Checks if a request should be rate limited.
    /// Returns true if the request is allowed, false if rate limited.
    pub fn check(&self, key: &str) -> bool {
        let limiter = self
            .limiters
            .entry(key.to_string())
            .or_insert_with(|| Arc::new(RateLimiter::direct(self.quota)));

        limiter.check().is_ok()
    }
}

/// Rate limiting middleware.
/// Expects the identity to be resolved by the auth middleware first.
pub async fn rate_limit_middleware(
    State(limiter): State<Arc<RateLimiterState>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    if is_public(request.uri().path()) {
        return next.run(request).await;
    }

    // Key the quota on the authenticated identity
    let key = request
        .extensions()
        .get::<CurrentUser>()
        .map(|user| user.email.clone())
        .unwrap_or_else(|| "anonymous".to_string());

    if !limiter.check(&key) {
        return (
            StatusCode::TOO_MANY_REQUESTS,
            Json(json!({
                "error": "Rate limit exceeded. Please try again later.",
                "retry_after_seconds": 60
            })),
        )
            .into_response();
    }

    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quota_exhaustion_per_key() {
        let state = RateLimiterState::new(2, Duration::from_secs(60));

        assert!(state.check("ada@example.com"));
        assert!(state.check("ada@example.com"));
        assert!(!state.check("ada@example.com"));

        // A different identity gets its own bucket
        assert!(state.check("charles@example.com"));
    }
}
