//! Row mapping helpers for the PostgreSQL store.

use sqlx::Row;
use taskmind_types::{UsageRecord, User};

use super::repository::RepositoryError;

pub(crate) const USER_COLUMNS: &str = "id, email, hashed_password, api_key, is_active, credits, \
                                       subscription_id, created_at, updated_at";

pub(crate) fn map_sqlx_err(err: sqlx::Error) -> RepositoryError {
    RepositoryError::Database(err.to_string())
}

/// Unique-constraint violations surface as `AlreadyExists`.
pub(crate) fn map_insert_err(err: sqlx::Error, email: &str) -> RepositoryError {
    let unique_violation = err
        .as_database_error()
        .and_then(|db_err| db_err.code())
        .is_some_and(|code| code == "23505");
    if unique_violation {
        RepositoryError::AlreadyExists(email.to_string())
    } else {
        map_sqlx_err(err)
    }
}

pub(crate) fn row_to_user(row: &sqlx::postgres::PgRow) -> User {
    User {
        id: row.get("id"),
        email: row.get("email"),
        password_hash: row.get("hashed_password"),
        api_key: row.get("api_key"),
        is_active: row.get("is_active"),
        credits: row.get("credits"),
        subscription_id: row.get("subscription_id"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

pub(crate) fn row_to_usage(row: &sqlx::postgres::PgRow) -> UsageRecord {
    UsageRecord {
        id: row.get("id"),
        user_id: row.get("user_id"),
        model: row.get("model"),
        tokens_used: row.get("tokens_used"),
        endpoint: row.get("endpoint"),
        method: row.get("method"),
        status_code: row.get("status_code"),
        timestamp: row.get("timestamp"),
    }
}
