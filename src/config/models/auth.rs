//! Authentication configuration

use super::*;
use serde::{Deserialize, Serialize};

/// Authentication configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Browser session lifetime in hours
    #[serde(default = "default_session_ttl_hours")]
    pub session_ttl_hours: u64,
    /// Name of the browser session cookie
    #[serde(default = "default_session_cookie_name")]
    pub session_cookie_name: String,
    /// Minimum accepted password length
    #[serde(default = "default_min_password_len")]
    pub min_password_len: usize,
    /// Maximum simultaneously non-revoked API tokens per user
    #[serde(default = "default_max_tokens_per_user")]
    pub max_tokens_per_user: usize,
    /// Upper bound on user-chosen token expiration
    #[serde(default = "default_max_token_expiration_days")]
    pub max_token_expiration_days: i64,
    /// Expiration applied to tokens minted by CLI pairing
    #[serde(default = "default_cli_token_expiration_days")]
    pub cli_token_expiration_days: i64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_ttl_hours: default_session_ttl_hours(),
            session_cookie_name: default_session_cookie_name(),
            min_password_len: default_min_password_len(),
            max_tokens_per_user: default_max_tokens_per_user(),
            max_token_expiration_days: default_max_token_expiration_days(),
            cli_token_expiration_days: default_cli_token_expiration_days(),
        }
    }
}

impl AuthConfig {
    /// Merge auth configurations
    pub fn merge(mut self, other: Self) -> Self {
        if other.session_ttl_hours != default_session_ttl_hours() {
            self.session_ttl_hours = other.session_ttl_hours;
        }
        if other.session_cookie_name != default_session_cookie_name() {
            self.session_cookie_name = other.session_cookie_name;
        }
        if other.min_password_len != default_min_password_len() {
            self.min_password_len = other.min_password_len;
        }
        if other.max_tokens_per_user != default_max_tokens_per_user() {
            self.max_tokens_per_user = other.max_tokens_per_user;
        }
        if other.max_token_expiration_days != default_max_token_expiration_days() {
            self.max_token_expiration_days = other.max_token_expiration_days;
        }
        if other.cli_token_expiration_days != default_cli_token_expiration_days() {
            self.cli_token_expiration_days = other.cli_token_expiration_days;
        }
        self
    }

    /// Validate authentication configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.session_ttl_hours == 0 {
            return Err("Session TTL cannot be 0".to_string());
        }

        if self.session_cookie_name.is_empty() {
            return Err("Session cookie name cannot be empty".to_string());
        }

        if self.min_password_len < 8 {
            return Err("Minimum password length must be at least 8".to_string());
        }

        if self.max_tokens_per_user == 0 {
            return Err("Token quota must allow at least one token".to_string());
        }

        if self.max_token_expiration_days <= 0 {
            return Err("Max token expiration must be positive".to_string());
        }

        if self.cli_token_expiration_days <= 0
            || self.cli_token_expiration_days > self.max_token_expiration_days
        {
            return Err(
                "CLI token expiration must be positive and within the general bound".to_string(),
            );
        }

        Ok(())
    }
}
