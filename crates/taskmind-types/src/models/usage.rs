//! Usage ledger records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Endpoint name stamped on every chat usage record.
pub const CHAT_ENDPOINT: &str = "/chat";

/// Insert payload for one ledger entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewUsageRecord {
    pub user_id: i64,
    pub model: String,
    /// Fragment count of the completed stream
    pub tokens_used: i64,
    pub endpoint: String,
    pub method: String,
    pub status_code: i32,
}

impl NewUsageRecord {
    /// Record for a completed `POST /chat` call.
    pub fn chat_completed(user_id: i64, model: impl Into<String>, tokens_used: i64) -> Self {
        Self {
            user_id,
            model: model.into(),
            tokens_used,
            endpoint: CHAT_ENDPOINT.to_string(),
            method: "POST".to_string(),
            status_code: 200,
        }
    }
}

/// A stored ledger entry. Never mutated after insert.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UsageRecord {
    pub id: i64,
    pub user_id: i64,
    pub model: String,
    pub tokens_used: i64,
    pub endpoint: String,
    pub method: String,
    pub status_code: i32,
    pub timestamp: DateTime<Utc>,
}
