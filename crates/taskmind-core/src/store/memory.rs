//! In-memory stores for ephemeral mode and tests.
//!
//! Nothing here survives a restart.

use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::RwLock;
use taskmind_types::{NewUsageRecord, UsageRecord, User};

use super::repository::{
    CounterError, NewUser, RepoResult, RepositoryError, RequestCounter, UsageLedger,
    UserRepository,
};

/// Users and usage ledger held in process memory.
#[derive(Default)]
pub struct MemoryStore {
    users: DashMap<i64, User>,
    next_user_id: AtomicI64,
    ledger: RwLock<Vec<UsageRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every ledger entry in insertion order.
    pub fn ledger_snapshot(&self) -> Vec<UsageRecord> {
        self.ledger.read().map(|records| records.clone()).unwrap_or_default()
    }

    fn find_user(&self, pred: impl Fn(&User) -> bool) -> Option<User> {
        self.users.iter().find(|entry| pred(entry.value())).map(|entry| entry.value().clone())
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<User>> {
        Ok(self.users.get(&id).map(|entry| entry.value().clone()))
    }

    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        Ok(self.find_user(|user| user.email == email))
    }

    async fn find_by_api_key(&self, api_key: &str) -> RepoResult<Option<User>> {
        Ok(self.find_user(|user| user.api_key == api_key))
    }

    async fn create_user(&self, user: NewUser) -> RepoResult<User> {
        if self.find_user(|existing| existing.email == user.email).is_some() {
            return Err(RepositoryError::AlreadyExists(user.email));
        }

        let id = self.next_user_id.fetch_add(1, Ordering::SeqCst) + 1;
        let now = chrono::Utc::now();
        let created = User {
            id,
            email: user.email,
            password_hash: user.password_hash,
            api_key: user.api_key,
            is_active: true,
            credits: user.credits,
            subscription_id: None,
            created_at: now,
            updated_at: now,
        };
        self.users.insert(id, created.clone());
        Ok(created)
    }

    async fn set_credits(&self, id: i64, credits: i64) -> RepoResult<()> {
        let mut entry =
            self.users.get_mut(&id).ok_or_else(|| RepositoryError::NotFound(id.to_string()))?;
        entry.credits = credits;
        entry.updated_at = chrono::Utc::now();
        Ok(())
    }

    async fn count_users(&self) -> RepoResult<i64> {
        Ok(self.users.len() as i64)
    }
}

#[async_trait]
impl UsageLedger for MemoryStore {
    async fn append(&self, record: NewUsageRecord) -> RepoResult<()> {
        let mut ledger =
            self.ledger.write().map_err(|err| RepositoryError::Database(err.to_string()))?;
        let id = ledger.len() as i64 + 1;
        ledger.push(UsageRecord {
            id,
            user_id: record.user_id,
            model: record.model,
            tokens_used: record.tokens_used,
            endpoint: record.endpoint,
            method: record.method,
            status_code: record.status_code,
            timestamp: chrono::Utc::now(),
        });
        Ok(())
    }

    async fn list_for_user(&self, user_id: i64, limit: i64) -> RepoResult<Vec<UsageRecord>> {
        let ledger =
            self.ledger.read().map_err(|err| RepositoryError::Database(err.to_string()))?;
        let limit = usize::try_from(limit).unwrap_or(0);
        Ok(ledger.iter().rev().filter(|r| r.user_id == user_id).take(limit).cloned().collect())
    }
}

/// Counter store backed by a concurrent map.
#[derive(Default)]
pub struct MemoryCounter {
    values: DashMap<String, i64>,
}

impl MemoryCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, key: impl Into<String>, value: i64) {
        self.values.insert(key.into(), value);
    }
}

#[async_trait]
impl RequestCounter for MemoryCounter {
    async fn current(&self, key: &str) -> Result<Option<i64>, CounterError> {
        Ok(self.values.get(key).map(|entry| *entry.value()))
    }
}
