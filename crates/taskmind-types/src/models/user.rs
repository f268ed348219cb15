//! User account model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Credits granted to a freshly registered user.
pub const DEFAULT_CREDITS: i64 = 100;

/// A registered user.
///
/// `credits` is expected to stay non-negative; the only place that enforces
/// it is the chat admission check.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub email: String,
    /// Opaque credential hash, never serialized to clients
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    /// Bearer credential
    #[serde(skip_serializing, default)]
    pub api_key: String,
    pub is_active: bool,
    pub credits: i64,
    pub subscription_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn view(&self) -> AccountView {
        AccountView {
            email: self.email.clone(),
            credits: self.credits,
            subscription: self.subscription_id.clone(),
        }
    }
}

/// Public projection returned by `GET /me`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AccountView {
    pub email: String,
    pub credits: i64,
    pub subscription: Option<String>,
}

/// Credential handed back by register/login.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenView {
    pub access_token: String,
    pub token_type: String,
}

impl TokenView {
    pub fn bearer(access_token: impl Into<String>) -> Self {
        Self { access_token: access_token.into(), token_type: "bearer".to_string() }
    }
}
