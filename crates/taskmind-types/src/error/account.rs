//! Account-related errors.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised by registration and login.
#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "details")]
pub enum AccountError {
    /// Registration attempted with an email that already has an account
    #[error("Email already registered")]
    EmailTaken,

    /// Unknown email or wrong password
    #[error("Incorrect email or password")]
    InvalidCredentials,

    /// Password could not be hashed
    #[error("Password hashing failed: {message}")]
    PasswordHash {
        /// Description of the hashing failure
        message: String,
    },

    /// Account storage failure
    #[error("Account storage error: {message}")]
    Storage {
        /// Description of the storage failure
        message: String,
    },
}

impl AccountError {
    /// Get HTTP status code for this error.
    pub fn http_status_code(&self) -> u16 {
        match self {
            Self::EmailTaken | Self::InvalidCredentials => 400,
            Self::PasswordHash { .. } | Self::Storage { .. } => 500,
        }
    }
}
