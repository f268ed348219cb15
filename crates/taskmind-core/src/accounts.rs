//! Registration and password login over a [`UserRepository`].

use taskmind_types::{AccountError, User, DEFAULT_CREDITS};

use crate::credentials::{generate_api_key, hash_password, verify_password};
use crate::store::{NewUser, RepositoryError, UserRepository};

impl From<RepositoryError> for AccountError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::AlreadyExists(_) => Self::EmailTaken,
            other => Self::Storage { message: other.to_string() },
        }
    }
}

/// Creates a user with a fresh API key. `credits` defaults to
/// [`DEFAULT_CREDITS`].
pub async fn register(
    users: &dyn UserRepository,
    email: &str,
    password: &str,
    credits: Option<i64>,
) -> Result<User, AccountError> {
    if users.find_by_email(email).await?.is_some() {
        return Err(AccountError::EmailTaken);
    }

    let password_hash = hash_password(password)
        .map_err(|e| AccountError::PasswordHash { message: e.to_string() })?;

    let user = users
        .create_user(NewUser {
            email: email.to_string(),
            password_hash,
            api_key: generate_api_key(),
            credits: credits.unwrap_or(DEFAULT_CREDITS),
        })
        .await?;

    tracing::info!(user_id = user.id, "User registered");
    Ok(user)
}

/// Verifies email and password. Unknown email and wrong password are
/// indistinguishable to the caller.
pub async fn authenticate(
    users: &dyn UserRepository,
    email: &str,
    password: &str,
) -> Result<User, AccountError> {
    match users.find_by_email(email).await? {
        Some(user) if verify_password(password, &user.password_hash) => Ok(user),
        _ => {
            tracing::warn!("Failed login attempt");
            Err(AccountError::InvalidCredentials)
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[tokio::test]
    async fn test_register_assigns_key_and_default_credits() {
        let store = MemoryStore::new();
        let user = register(&store, "ada@example.com", "pw", None).await.unwrap();

        assert!(user.api_key.starts_with("sk-"));
        assert_eq!(user.credits, DEFAULT_CREDITS);
        assert!(user.password_hash.starts_with("$argon2id$"));
    }

    #[tokio::test]
    async fn test_register_rejects_duplicate_email() {
        let store = MemoryStore::new();
        register(&store, "ada@example.com", "pw", None).await.unwrap();

        let err = register(&store, "ada@example.com", "other", None).await.unwrap_err();
        assert_eq!(err, AccountError::EmailTaken);
    }

    #[tokio::test]
    async fn test_authenticate() {
        let store = MemoryStore::new();
        let created = register(&store, "ada@example.com", "pw", Some(3)).await.unwrap();

        let user = authenticate(&store, "ada@example.com", "pw").await.unwrap();
        assert_eq!(user.id, created.id);
        assert_eq!(user.credits, 3);

        assert_eq!(
            authenticate(&store, "ada@example.com", "wrong").await.unwrap_err(),
            AccountError::InvalidCredentials
        );
        assert_eq!(
            authenticate(&store, "nobody@example.com", "pw").await.unwrap_err(),
            AccountError::InvalidCredentials
        );
    }
}
