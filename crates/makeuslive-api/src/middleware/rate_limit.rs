//! Per-IP rate limiting for the public submission endpoints.

use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    extract::{Request, State},
    http::HeaderValue,
    middleware::Next,
    response::{IntoResponse, Response},
};
use makeuslive_core::AppError;
use tokio::sync::Mutex;

use crate::error::HttpAppError;
use crate::utils::client_ip::extract_client_ip;

#[derive(Clone)]
struct RateLimitBucket {
    count: u32,
    reset_at: Instant,
}

impl RateLimitBucket {
    fn new(window_seconds: u64) -> Self {
        Self {
            count: 0,
            reset_at: Instant::now() + Duration::from_secs(window_seconds),
        }
    }

    fn check_and_increment(&mut self, limit: u32, window_seconds: u64) -> (bool, u32) {
        let now = Instant::now();

        if now >= self.reset_at {
            self.count = 0;
            self.reset_at = now + Duration::from_secs(window_seconds);
        }

        if self.count < limit {
            self.count += 1;
            (true, limit.saturating_sub(self.count))
        } else {
            (false, 0)
        }
    }
}

/// Sharded in-memory rate limiter. Keys hash to one of a fixed number of
/// shards to keep lock contention down under submission bursts.
#[derive(Clone)]
pub struct HttpRateLimiter {
    shards: Vec<Arc<Mutex<HashMap<String, RateLimitBucket>>>>,
    shard_count: usize,
    limit_per_minute: u32,
    window_seconds: u64,
}

impl HttpRateLimiter {
    pub fn new(limit_per_minute: u32) -> Self {
        Self::with_shards(limit_per_minute, 16)
    }

    pub fn with_shards(limit_per_minute: u32, shard_count: usize) -> Self {
        let shards = (0..shard_count)
            .map(|_| Arc::new(Mutex::new(HashMap::new())))
            .collect();
        Self {
            shards,
            shard_count,
            limit_per_minute,
            window_seconds: 60,
        }
    }

    fn shard_index(&self, key: &str) -> usize {
        let mut hasher = std::collections::hash_map::DefaultHasher::new();
        key.hash(&mut hasher);
        (hasher.finish() as usize) % self.shard_count
    }

    /// Returns (allowed, remaining) for the given key.
    pub async fn check(&self, key: &str) -> (bool, u32) {
        let shard = &self.shards[self.shard_index(key)];
        let mut guard = shard.lock().await;
        let bucket = guard
            .entry(key.to_string())
            .or_insert_with(|| RateLimitBucket::new(self.window_seconds));
        bucket.check_and_increment(self.limit_per_minute, self.window_seconds)
    }

    pub fn limit(&self) -> u32 {
        self.limit_per_minute
    }

    /// Drop buckets whose window has passed. Run periodically so idle IPs
    /// do not accumulate forever.
    pub async fn cleanup_expired_buckets(&self) {
        let now = Instant::now();
        for shard in &self.shards {
            let mut guard = shard.lock().await;
            guard.retain(|_, bucket| now < bucket.reset_at);
        }
    }
}

/// Axum middleware enforcing the limiter keyed on the client IP.
pub async fn rate_limit_middleware(
    State(limiter): State<Arc<HttpRateLimiter>>,
    request: Request,
    next: Next,
) -> Response {
    let ip = extract_client_ip(request.headers());
    let (allowed, remaining) = limiter.check(&ip).await;

    if !allowed {
        tracing::warn!(client_ip = %ip, "Submission rate limit exceeded");
        return HttpAppError::from(AppError::TooManyRequests(
            "Too many submissions, slow down".to_string(),
        ))
        .into_response();
    }

    let mut response = next.run(request).await;
    let headers = response.headers_mut();
    if let Ok(v) = HeaderValue::from_str(&limiter.limit().to_string()) {
        headers.insert("X-RateLimit-Limit", v);
    }
    if let Ok(v) = HeaderValue::from_str(&remaining.to_string()) {
        headers.insert("X-RateLimit-Remaining", v);
    }
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn allows_up_to_limit_then_blocks() {
        let limiter = HttpRateLimiter::with_shards(3, 4);
        assert_eq!(limiter.check("1.2.3.4").await, (true, 2));
        assert_eq!(limiter.check("1.2.3.4").await, (true, 1));
        assert_eq!(limiter.check("1.2.3.4").await, (true, 0));
        assert_eq!(limiter.check("1.2.3.4").await, (false, 0));
        // Independent keys have independent budgets
        assert_eq!(limiter.check("5.6.7.8").await, (true, 2));
    }
}
