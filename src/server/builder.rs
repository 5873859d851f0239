//! Server construction helpers
//!
//! `ServerBuilder` assembles an [`HttpServer`] from an explicit `Config`;
//! [`run_server`] is the batteries-included entry point used by the binary,
//! loading the default config file and falling back to defaults.

use crate::config::Config;
use crate::server::server::HttpServer;
use crate::utils::error::{ApiError, Result};
use tracing::info;

/// Default configuration file consulted by [`run_server`]
const DEFAULT_CONFIG_PATH: &str = "config/lynxprompt.yaml";

/// Builder for an [`HttpServer`]
pub struct ServerBuilder {
    config: Option<Config>,
}

impl ServerBuilder {
    pub fn new() -> Self {
        Self { config: None }
    }

    /// Supply the configuration to serve with
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Assemble the server, connecting storage and wiring services
    pub async fn build(self) -> Result<HttpServer> {
        let config = self
            .config
            .ok_or_else(|| ApiError::Config("Configuration is required".to_string()))?;

        HttpServer::new(&config).await
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Load the default config file, or fall back to built-in defaults
async fn load_or_default(path: &str) -> Config {
    info!("📄 Loading configuration file: {}", path);
    match Config::from_file(path).await {
        Ok(config) => {
            info!("✅ Configuration file loaded");
            config
        }
        Err(e) => {
            info!("⚠️  Could not load {}: {}. Using defaults", path, e);
            Config::default()
        }
    }
}

/// Start the service with automatic configuration loading
pub async fn run_server() -> Result<()> {
    info!("🚀 Starting LynxPrompt core service");

    let config = load_or_default(DEFAULT_CONFIG_PATH).await;

    let server = HttpServer::new(&config).await?;
    info!(
        "🌐 Server starting at: http://{}:{}",
        config.server().host,
        config.server().port
    );
    info!("📋 API Endpoints:");
    info!("   GET  /health - Health check");
    info!("   POST /auth/register - Create an account");
    info!("   POST /auth/login - Sign in");
    info!("   GET  /v1/user - Current user profile");
    info!("   POST /user/api-tokens - Mint an API token");
    info!("   POST /cli-auth/init - Start CLI pairing");
    info!("   GET  /v1/blueprints - List blueprints");

    server.start().await
}
