//! Utility modules for the LynxPrompt core service
//!
//! ## Module Organization
//!
//! - **crypto**: Token generation, hashing, and password handling
//! - **error**: Error types and HTTP error mapping

pub mod crypto;
pub mod error;

use once_cell::sync::Lazy;
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

static EMAIL_PATTERN: Lazy<regex::Regex> = Lazy::new(|| {
    regex::Regex::new(r#"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$"#)
        .expect("email pattern is valid")
});

/// Generate a unique request ID
pub fn generate_request_id() -> String {
    Uuid::new_v4().to_string()
}

/// Get current timestamp in seconds
pub fn current_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

/// Check if a string is a plausible email address
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}
