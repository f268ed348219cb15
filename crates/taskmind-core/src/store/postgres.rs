//! PostgreSQL implementation of the user repository and usage ledger.

use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;
use taskmind_types::{NewUsageRecord, UsageRecord, User};

use super::postgres_helpers::{
    map_insert_err, map_sqlx_err, row_to_usage, row_to_user, USER_COLUMNS,
};
use super::repository::{NewUser, RepoResult, RepositoryError, UsageLedger, UserRepository};
use crate::error::AppResult;

/// PostgreSQL-backed store for users and the usage ledger.
#[derive(Clone)]
pub struct PostgresStore {
    /// Database connection pool.
    pool: PgPool,
}

impl PostgresStore {
    /// Connect to database and create store.
    pub async fn connect(database_url: &str) -> AppResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(20)
            .min_connections(2)
            .acquire_timeout(Duration::from_secs(30))
            .idle_timeout(Duration::from_secs(300))
            .connect(database_url)
            .await?;
        Ok(Self { pool })
    }

    /// Run database migrations.
    pub async fn run_migrations(&self) -> AppResult<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }

    async fn find_user_by(&self, column: &str, value: &str) -> RepoResult<Option<User>> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE {column} = $1");
        let row = sqlx::query(&query)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_err)?;
        Ok(row.as_ref().map(row_to_user))
    }
}

#[async_trait]
impl UserRepository for PostgresStore {
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<User>> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
        let row = sqlx::query(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_err)?;
        Ok(row.as_ref().map(row_to_user))
    }

    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        self.find_user_by("email", email).await
    }

    async fn find_by_api_key(&self, api_key: &str) -> RepoResult<Option<User>> {
        self.find_user_by("api_key", api_key).await
    }

    async fn create_user(&self, user: NewUser) -> RepoResult<User> {
        let query = format!(
            r#"INSERT INTO users (email, hashed_password, api_key, credits)
               VALUES ($1, $2, $3, $4)
               RETURNING {USER_COLUMNS}"#
        );
        let row = sqlx::query(&query)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(&user.api_key)
            .bind(user.credits)
            .fetch_one(&self.pool)
            .await
            .map_err(|err| map_insert_err(err, &user.email))?;
        Ok(row_to_user(&row))
    }

    async fn set_credits(&self, id: i64, credits: i64) -> RepoResult<()> {
        let result = sqlx::query("UPDATE users SET credits = $1, updated_at = NOW() WHERE id = $2")
            .bind(credits)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_err)?;
        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(id.to_string()));
        }
        Ok(())
    }

    async fn count_users(&self) -> RepoResult<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx_err)
    }
}

#[async_trait]
impl UsageLedger for PostgresStore {
    async fn append(&self, record: NewUsageRecord) -> RepoResult<()> {
        sqlx::query(
            r#"INSERT INTO api_requests (user_id, model, tokens_used, endpoint, method, status_code)
               VALUES ($1, $2, $3, $4, $5, $6)"#,
        )
        .bind(record.user_id)
        .bind(&record.model)
        .bind(record.tokens_used)
        .bind(&record.endpoint)
        .bind(&record.method)
        .bind(record.status_code)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_err)?;
        Ok(())
    }

    async fn list_for_user(&self, user_id: i64, limit: i64) -> RepoResult<Vec<UsageRecord>> {
        let rows = sqlx::query(
            r#"SELECT id, user_id, model, tokens_used, endpoint, method, status_code, timestamp
               FROM api_requests WHERE user_id = $1
               ORDER BY timestamp DESC, id DESC LIMIT $2"#,
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_err)?;
        Ok(rows.iter().map(row_to_usage).collect())
    }
}
