//! Unified error types for Taskmind Core.

use thiserror::Error;

/// Error type for operations outside the chat pipeline (startup, admin, migrations).
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum AppError {
    /// Database operation failed (PostgreSQL).
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Schema migration failed.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Result type alias for Taskmind operations.
pub type AppResult<T> = Result<T, AppError>;
