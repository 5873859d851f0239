//! Main application configuration

#![allow(missing_docs)]

use super::*;
use serde::{Deserialize, Serialize};

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Storage configuration
    #[serde(default)]
    pub storage: StorageConfig,
    /// Authentication configuration
    #[serde(default)]
    pub auth: AuthConfig,
    /// CLI device-pairing configuration
    #[serde(default)]
    pub pairing: PairingConfig,
    /// Rate limiting configuration
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
}

impl AppConfig {
    /// Build a configuration from environment variables over defaults
    pub fn from_env() -> crate::utils::error::Result<Self> {
        let mut config = Self::default();

        if let Ok(url) = std::env::var("DATABASE_URL") {
            config.storage.database.url = url;
        }
        if let Ok(host) = std::env::var("LYNXPROMPT_HOST") {
            config.server.host = host;
        }
        if let Ok(port) = std::env::var("LYNXPROMPT_PORT") {
            config.server.port = port.parse().map_err(|_| {
                crate::utils::error::ApiError::Config(format!(
                    "LYNXPROMPT_PORT is not a valid port: {}",
                    port
                ))
            })?;
        }
        if let Ok(url) = std::env::var("LYNXPROMPT_AUTH_PAGE_URL") {
            config.pairing.auth_page_url = url;
        }

        Ok(config)
    }

    /// Merge two configurations, with other taking precedence
    pub fn merge(mut self, other: Self) -> Self {
        self.server = self.server.merge(other.server);
        self.storage = self.storage.merge(other.storage);
        self.auth = self.auth.merge(other.auth);
        self.pairing = self.pairing.merge(other.pairing);
        self.rate_limit = self.rate_limit.merge(other.rate_limit);
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        self.server.validate()?;
        self.server.cors.validate()?;
        self.storage.database.validate()?;
        self.auth.validate()?;
        self.pairing.validate()?;
        self.rate_limit.validate()?;
        Ok(())
    }
}
