//! Bearer-token middleware for the admin surface, plus the login failure
//! limiter shared with the login handler.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use makeuslive_core::AppError;
use tokio::sync::Mutex;

use crate::auth::jwt;
use crate::auth::models::AdminContext;
use crate::error::HttpAppError;

/// Fixed-window counter of authentication failures per client IP.
#[derive(Clone)]
pub struct AuthFailureLimiter {
    inner: Arc<Mutex<HashMap<String, (u32, Instant)>>>,
    max_failures: u32,
    window: Duration,
}

impl AuthFailureLimiter {
    pub fn new(max_failures: u32, window_seconds: u64) -> Self {
        Self {
            inner: Arc::new(Mutex::new(HashMap::new())),
            max_failures,
            window: Duration::from_secs(window_seconds),
        }
    }

    /// Record one failure. Returns true when the IP has crossed the limit.
    pub async fn record_failure(&self, ip: &str) -> bool {
        let mut guard = self.inner.lock().await;
        let now = Instant::now();
        let (count, reset_at) = guard.entry(ip.to_string()).or_insert((0, now + self.window));
        if now >= *reset_at {
            *count = 0;
            *reset_at = now + self.window;
        }
        *count += 1;
        *count >= self.max_failures
    }

    pub async fn is_blocked(&self, ip: &str) -> bool {
        let mut guard = self.inner.lock().await;
        if let Some((count, reset_at)) = guard.get(ip) {
            if Instant::now() >= *reset_at {
                guard.remove(ip);
                return false;
            }
            return *count >= self.max_failures;
        }
        false
    }
}

/// State for the bearer-token middleware. Token validation is stateless;
/// the claims carry everything the admin surface needs.
#[derive(Clone)]
pub struct AuthState {
    pub jwt_secret: String,
}

/// Validate the `Authorization: Bearer` token and inject [`AdminContext`].
pub async fn auth_middleware(
    State(auth_state): State<Arc<AuthState>>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = match request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
    {
        Some(t) => t,
        None => {
            return HttpAppError::from(AppError::Unauthorized(
                "Missing bearer token".to_string(),
            ))
            .into_response();
        }
    };

    let claims = match jwt::validate_token(&auth_state.jwt_secret, token) {
        Ok(claims) => claims,
        Err(err) => return HttpAppError::from(err).into_response(),
    };

    request.extensions_mut().insert(AdminContext {
        admin_id: claims.sub,
        email: claims.email,
    });

    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn limiter_blocks_after_max_failures() {
        let limiter = AuthFailureLimiter::new(3, 60);
        assert!(!limiter.is_blocked("10.0.0.1").await);
        assert!(!limiter.record_failure("10.0.0.1").await);
        assert!(!limiter.record_failure("10.0.0.1").await);
        assert!(limiter.record_failure("10.0.0.1").await);
        assert!(limiter.is_blocked("10.0.0.1").await);
        // Other IPs are unaffected
        assert!(!limiter.is_blocked("10.0.0.2").await);
    }

    #[tokio::test]
    async fn limiter_window_resets() {
        let limiter = AuthFailureLimiter::new(1, 0);
        limiter.record_failure("10.0.0.1").await;
        // Zero-length window expires immediately
        assert!(!limiter.is_blocked("10.0.0.1").await);
    }
}
