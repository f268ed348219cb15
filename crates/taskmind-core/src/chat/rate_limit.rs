//! Hourly request threshold check against the counter store.
//!
//! This is a read-only check. Nothing in the chat path increments the counter
//! and no expiry is set on it, so whatever maintains `rate_limit:<user_id>`
//! lives outside this crate. Two concurrent requests can both pass before
//! either shows up in the store.

use std::sync::Arc;

use taskmind_types::ChatError;

use crate::store::RequestCounter;

/// Requests strictly above this count are rejected.
pub const RATE_LIMIT_THRESHOLD: i64 = 100;

#[derive(Clone)]
pub struct RateLimiter {
    counter: Arc<dyn RequestCounter>,
    threshold: i64,
}

impl RateLimiter {
    pub fn new(counter: Arc<dyn RequestCounter>) -> Self {
        Self::with_threshold(counter, RATE_LIMIT_THRESHOLD)
    }

    pub fn with_threshold(counter: Arc<dyn RequestCounter>, threshold: i64) -> Self {
        Self { counter, threshold }
    }

    pub fn key(user_id: i64) -> String {
        format!("rate_limit:{}", user_id)
    }

    pub async fn check(&self, user_id: i64) -> Result<(), ChatError> {
        let key = Self::key(user_id);
        match self.counter.current(&key).await {
            Ok(Some(count)) if count > self.threshold => {
                tracing::warn!(user_id, count, threshold = self.threshold, "Rate limit exceeded");
                Err(ChatError::RateLimitExceeded)
            },
            Ok(_) => Ok(()),
            Err(e) => {
                tracing::error!(user_id, "Rate limit lookup failed: {}", e);
                Err(ChatError::CounterStore { message: e.to_string() })
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{CounterError, MemoryCounter};
    use async_trait::async_trait;

    struct BrokenCounter;

    #[async_trait]
    impl RequestCounter for BrokenCounter {
        async fn current(&self, _key: &str) -> Result<Option<i64>, CounterError> {
            Err(CounterError::Unavailable("connection refused".to_string()))
        }
    }

    #[test]
    fn test_key_format() {
        assert_eq!(RateLimiter::key(42), "rate_limit:42");
    }

    #[tokio::test]
    async fn test_missing_counter_passes() {
        let limiter = RateLimiter::new(Arc::new(MemoryCounter::new()));
        assert!(limiter.check(1).await.is_ok());
    }

    #[tokio::test]
    async fn test_threshold_is_exclusive() {
        let counter = Arc::new(MemoryCounter::new());
        let limiter = RateLimiter::new(counter.clone());

        counter.set("rate_limit:1", 100);
        assert!(limiter.check(1).await.is_ok());

        counter.set("rate_limit:1", 101);
        assert_eq!(limiter.check(1).await, Err(ChatError::RateLimitExceeded));
    }

    #[tokio::test]
    async fn test_check_does_not_increment() {
        let counter = Arc::new(MemoryCounter::new());
        counter.set("rate_limit:3", 50);
        let limiter = RateLimiter::new(counter.clone());

        for _ in 0..5 {
            limiter.check(3).await.unwrap();
        }
        assert_eq!(counter.current("rate_limit:3").await.unwrap(), Some(50));
    }

    #[tokio::test]
    async fn test_store_failure_maps_to_counter_store_error() {
        let limiter = RateLimiter::new(Arc::new(BrokenCounter));
        let err = limiter.check(1).await.unwrap_err();
        assert!(matches!(err, ChatError::CounterStore { .. }));
        assert_eq!(err.http_status_code(), 500);
    }
}
