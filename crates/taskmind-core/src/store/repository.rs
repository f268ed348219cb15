//! Repository traits for storage abstraction.

use async_trait::async_trait;
use taskmind_types::{NewUsageRecord, UsageRecord, User};

pub type RepoResult<T> = Result<T, RepositoryError>;

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("User not found: {0}")]
    NotFound(String),
    #[error("User already exists: {0}")]
    AlreadyExists(String),
    #[error("Database error: {0}")]
    Database(String),
}

/// Fields needed to create a user; id and timestamps are assigned by the store.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub api_key: String,
    pub credits: i64,
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<User>>;
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>>;
    async fn find_by_api_key(&self, api_key: &str) -> RepoResult<Option<User>>;
    async fn create_user(&self, user: NewUser) -> RepoResult<User>;
    async fn set_credits(&self, id: i64, credits: i64) -> RepoResult<()>;
    async fn count_users(&self) -> RepoResult<i64>;
}

/// Append-only store of chat usage records.
#[async_trait]
pub trait UsageLedger: Send + Sync {
    async fn append(&self, record: NewUsageRecord) -> RepoResult<()>;
    /// Most recent records first.
    async fn list_for_user(&self, user_id: i64, limit: i64) -> RepoResult<Vec<UsageRecord>>;
}

#[derive(Debug, thiserror::Error)]
pub enum CounterError {
    #[error("counter store unavailable: {0}")]
    Unavailable(String),
    #[error("counter {key} holds a non-integer value: {value}")]
    InvalidValue { key: String, value: String },
}

/// External fast key-value store holding per-user request counters.
#[async_trait]
pub trait RequestCounter: Send + Sync {
    /// Current value under `key`, `None` when the key is absent.
    async fn current(&self, key: &str) -> Result<Option<i64>, CounterError>;
}

/// A blank value reads the same as an absent key.
pub(crate) fn parse_counter(key: &str, raw: &str) -> Result<Option<i64>, CounterError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed.parse::<i64>().map(Some).map_err(|_| CounterError::InvalidValue {
        key: key.to_string(),
        value: raw.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_counter() {
        assert_eq!(parse_counter("k", "101").unwrap(), Some(101));
        assert_eq!(parse_counter("k", " 7 ").unwrap(), Some(7));
        assert!(matches!(parse_counter("k", "lots"), Err(CounterError::InvalidValue { .. })));
    }

    #[test]
    fn test_blank_counter_reads_as_absent() {
        assert_eq!(parse_counter("rate_limit:1", "").unwrap(), None);
        assert_eq!(parse_counter("rate_limit:1", "   ").unwrap(), None);
        assert_eq!(parse_counter("rate_limit:1", "\n").unwrap(), None);
    }
}
