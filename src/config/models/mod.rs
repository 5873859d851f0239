//! Configuration data models
//!
//! This module defines all configuration structures used throughout the service.

#![allow(missing_docs)]

pub mod app;
pub mod auth;
pub mod pairing;
pub mod rate_limit;
pub mod server;
pub mod storage;

// Re-export all configuration types
pub use app::*;
pub use auth::*;
pub use pairing::*;
pub use rate_limit::*;
pub use server::*;
pub use storage::*;

/// Default values for configuration
pub fn default_host() -> String {
    "0.0.0.0".to_string()
}

/// Default server port
pub fn default_port() -> u16 {
    8080
}

/// Default request timeout in seconds
pub fn default_timeout() -> u64 {
    30
}

/// Default maximum body size in bytes
pub fn default_max_body_size() -> usize {
    1024 * 1024 // 1MB, blueprint payloads are small text files
}

pub fn default_max_connections() -> u32 {
    10
}

pub fn default_connection_timeout() -> u64 {
    5
}

pub fn default_session_ttl_hours() -> u64 {
    24 * 30 // 30 days
}

pub fn default_session_cookie_name() -> String {
    "lynx_session".to_string()
}

pub fn default_min_password_len() -> usize {
    8
}

pub fn default_max_tokens_per_user() -> usize {
    10
}

pub fn default_max_token_expiration_days() -> i64 {
    365
}

pub fn default_cli_token_expiration_days() -> i64 {
    365
}

pub fn default_pairing_ttl_secs() -> u64 {
    300 // 5 minutes
}

pub fn default_completed_grace_secs() -> u64 {
    60
}

pub fn default_auth_page_url() -> String {
    "http://localhost:3000/cli-auth".to_string()
}

pub fn default_rate_limit_max_requests() -> u32 {
    60
}

pub fn default_rate_limit_window_secs() -> u64 {
    60
}
