//! Configuration management for the LynxPrompt core service
//!
//! This module handles loading, validation, and management of all service configuration.

pub mod models;

pub use models::*;

use crate::utils::error::{ApiError, Result};
use std::path::Path;
use tracing::{debug, info};

/// Main configuration struct for the service
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Application configuration
    pub app: AppConfig,
}

impl Config {
    /// Load configuration from file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| ApiError::Config(format!("Failed to read config file: {}", e)))?;

        let app: AppConfig = serde_yaml::from_str(&content)
            .map_err(|e| ApiError::Config(format!("Failed to parse config: {}", e)))?;

        let config = Self { app };
        config.validate()?;

        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let app = AppConfig::from_env()?;
        let config = Self { app };

        config.validate()?;
        Ok(config)
    }

    /// Get server configuration
    pub fn server(&self) -> &ServerConfig {
        &self.app.server
    }

    /// Get storage configuration
    pub fn storage(&self) -> &StorageConfig {
        &self.app.storage
    }

    /// Get auth configuration
    pub fn auth(&self) -> &AuthConfig {
        &self.app.auth
    }

    /// Get pairing configuration
    pub fn pairing(&self) -> &PairingConfig {
        &self.app.pairing
    }

    /// Get rate limit configuration
    pub fn rate_limit(&self) -> &RateLimitConfig {
        &self.app.rate_limit
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        debug!("Validating configuration");

        self.app
            .validate()
            .map_err(|e| ApiError::Config(format!("Config error: {}", e)))?;

        debug!("Configuration validation completed");
        Ok(())
    }

    /// Merge with another configuration (other takes precedence)
    pub fn merge(mut self, other: Self) -> Self {
        self.app = self.app.merge(other.app);
        self
    }

    /// Convert to JSON string
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.app)
            .map_err(|e| ApiError::Config(format!("Failed to serialize config to JSON: {}", e)))
    }

    /// Convert to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(&self.app)
            .map_err(|e| ApiError::Config(format!("Failed to serialize config to YAML: {}", e)))
    }
}
