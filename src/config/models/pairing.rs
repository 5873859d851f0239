//! CLI device-pairing configuration

use super::*;
use serde::{Deserialize, Serialize};

/// CLI device-pairing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PairingConfig {
    /// Lifetime of a pending pairing session in seconds
    #[serde(default = "default_pairing_ttl_secs")]
    pub session_ttl_secs: u64,
    /// How long a completed session row lingers after the token was handed
    /// out, so duplicate polls from the CLI do not error
    #[serde(default = "default_completed_grace_secs")]
    pub completed_grace_secs: u64,
    /// Hosted sign-in page the CLI sends the user to; the session id is
    /// appended as a query parameter
    #[serde(default = "default_auth_page_url")]
    pub auth_page_url: String,
}

impl Default for PairingConfig {
    fn default() -> Self {
        Self {
            session_ttl_secs: default_pairing_ttl_secs(),
            completed_grace_secs: default_completed_grace_secs(),
            auth_page_url: default_auth_page_url(),
        }
    }
}

impl PairingConfig {
    /// Merge pairing configurations
    pub fn merge(mut self, other: Self) -> Self {
        if other.session_ttl_secs != default_pairing_ttl_secs() {
            self.session_ttl_secs = other.session_ttl_secs;
        }
        if other.completed_grace_secs != default_completed_grace_secs() {
            self.completed_grace_secs = other.completed_grace_secs;
        }
        if other.auth_page_url != default_auth_page_url() {
            self.auth_page_url = other.auth_page_url;
        }
        self
    }

    /// Validate pairing configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.session_ttl_secs == 0 {
            return Err("Pairing session TTL cannot be 0".to_string());
        }

        if self.session_ttl_secs > 3600 {
            return Err("Pairing session TTL should not exceed one hour".to_string());
        }

        if url::Url::parse(&self.auth_page_url).is_err() {
            return Err(format!("Invalid auth page URL: {}", self.auth_page_url));
        }

        Ok(())
    }
}
