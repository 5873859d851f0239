//! Rate limiting configuration

use super::*;
use serde::{Deserialize, Serialize};

/// Rate limiting configuration
///
/// Advisory abuse mitigation on the unauthenticated endpoints. Never
/// consulted for correctness decisions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Enable rate limiting
    #[serde(default)]
    pub enabled: bool,
    /// Requests allowed per window, per client
    #[serde(default = "default_rate_limit_max_requests")]
    pub max_requests: u32,
    /// Window length in seconds
    #[serde(default = "default_rate_limit_window_secs")]
    pub window_secs: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            max_requests: default_rate_limit_max_requests(),
            window_secs: default_rate_limit_window_secs(),
        }
    }
}

impl RateLimitConfig {
    /// Merge rate limit configurations
    pub fn merge(mut self, other: Self) -> Self {
        if other.enabled {
            self.enabled = other.enabled;
        }
        if other.max_requests != default_rate_limit_max_requests() {
            self.max_requests = other.max_requests;
        }
        if other.window_secs != default_rate_limit_window_secs() {
            self.window_secs = other.window_secs;
        }
        self
    }

    /// Validate rate limit configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.enabled {
            if self.max_requests == 0 {
                return Err("Rate limit must allow at least one request".to_string());
            }
            if self.window_secs == 0 {
                return Err("Rate limit window cannot be 0".to_string());
            }
        }
        Ok(())
    }
}
