//! Credit balance gate.
//!
//! Only checks the balance. Nothing here decrements it; credit consumption
//! is owned by whatever tops up and bills accounts.

use taskmind_types::{ChatError, User};

#[derive(Debug, Clone, Copy, Default)]
pub struct CreditGate;

impl CreditGate {
    pub fn check(&self, user: &User) -> Result<(), ChatError> {
        if user.credits <= 0 {
            tracing::warn!(user_id = user.id, credits = user.credits, "No credits remaining");
            return Err(ChatError::InsufficientCredits);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_with(credits: i64) -> User {
        let now = chrono::Utc::now();
        User {
            id: 1,
            email: "a@example.com".to_string(),
            password_hash: String::new(),
            api_key: "sk-a".to_string(),
            is_active: true,
            credits,
            subscription_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_positive_balance_passes() {
        assert!(CreditGate.check(&user_with(1)).is_ok());
    }

    #[test]
    fn test_zero_and_negative_rejected() {
        assert_eq!(CreditGate.check(&user_with(0)), Err(ChatError::InsufficientCredits));
        assert_eq!(CreditGate.check(&user_with(-3)), Err(ChatError::InsufficientCredits));
    }
}
