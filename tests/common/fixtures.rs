//! Test fixtures and data factories
//!
//! Provides factory methods for creating test data with sensible defaults.
//! All factories create real objects, not mocks.

use lynxprompt_rs::auth::CreateTokenParams;
use lynxprompt_rs::core::models::api_token::TokenRole;
use lynxprompt_rs::core::models::user::Plan;
use lynxprompt_rs::storage::StorageLayer;
use lynxprompt_rs::storage::database::entities::user;
use lynxprompt_rs::utils::crypto::hash_password;
use uuid::Uuid;

/// Signup data for registration tests
#[derive(Debug, Clone)]
pub struct Signup {
    pub email: String,
    pub name: String,
    pub password: String,
}

/// Factory for creating test users
pub struct UserFactory;

impl UserFactory {
    /// Create signup data with a unique email
    pub fn signup() -> Signup {
        Signup {
            email: format!("test-{}@example.com", &Uuid::new_v4().to_string()[..8]),
            name: "Test User".to_string(),
            password: "correct horse battery".to_string(),
        }
    }

    /// Create signup data with a specific email
    pub fn with_email(email: &str) -> Signup {
        let mut signup = Self::signup();
        signup.email = email.to_string();
        signup
    }

    /// Persist a fresh user row and return it
    pub async fn seed_user(storage: &StorageLayer) -> user::Model {
        Self::seed_user_with(storage, &Self::signup()).await
    }

    /// Persist a user row from the given signup data
    pub async fn seed_user_with(storage: &StorageLayer, signup: &Signup) -> user::Model {
        let hash = hash_password(&signup.password).expect("Failed to hash test password");
        storage
            .db()
            .create_user(&signup.email, &signup.name, &hash, Plan::Free)
            .await
            .expect("Failed to seed test user")
    }
}

/// Factory for creating token creation parameters
pub struct TokenParamsFactory;

impl TokenParamsFactory {
    /// Create default parameters: a 30-day blueprints read-write token
    pub fn create() -> CreateTokenParams {
        CreateTokenParams {
            name: "Test Token".to_string(),
            role: TokenRole::BlueprintsFull,
            expiration_days: 30,
        }
    }

    /// Create parameters with a specific role
    pub fn with_role(role: TokenRole) -> CreateTokenParams {
        let mut params = Self::create();
        params.role = role;
        params
    }

    /// Create parameters with a specific name
    pub fn named(name: &str) -> CreateTokenParams {
        let mut params = Self::create();
        params.name = name.to_string();
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signup_factory() {
        let signup = UserFactory::signup();
        assert!(signup.email.contains('@'));
        assert!(!signup.name.is_empty());
        assert!(signup.password.len() >= 8);
    }

    #[test]
    fn test_signup_emails_are_unique() {
        let a = UserFactory::signup();
        let b = UserFactory::signup();
        assert_ne!(a.email, b.email);
    }

    #[test]
    fn test_email_override() {
        let signup = UserFactory::with_email("fixed@example.com");
        assert_eq!(signup.email, "fixed@example.com");
    }

    #[test]
    fn test_token_params_factory() {
        let params = TokenParamsFactory::create();
        assert_eq!(params.role, TokenRole::BlueprintsFull);
        assert_eq!(params.expiration_days, 30);
    }

    #[test]
    fn test_token_params_role_override() {
        let params = TokenParamsFactory::with_role(TokenRole::ProfileFull);
        assert_eq!(params.role, TokenRole::ProfileFull);
    }
}
