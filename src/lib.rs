//! # LynxPrompt-RS
//!
//! Core backend for LynxPrompt: API token service, CLI device pairing,
//! and unified session/token authentication, plus a typed client SDK.
//!
//! ## Features
//!
//! - **API Tokens**: `lp_`-prefixed bearer tokens stored as SHA-256 hashes,
//!   scoped by role and capped per user
//! - **CLI Pairing**: browser-confirmed device pairing that mints a
//!   long-lived token for the `lynx` CLI
//! - **Unified Authentication**: one façade resolves browser session
//!   cookies and Bearer tokens to the same caller identity
//! - **Blueprints**: per-user configuration files with public/private
//!   visibility, the surface that role-scoped tokens act on
//!
//! ## Quick Start - Client SDK
//!
//! ```rust,no_run
//! use lynxprompt_rs::sdk::LynxClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = LynxClient::new("http://localhost:8090")?
//!         .with_token("lp_your_token_here");
//!
//!     for blueprint in client.list_blueprints().await? {
//!         println!("{}  {}", blueprint.slug, blueprint.name);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Server Mode
//!
//! ```rust,no_run
//! use lynxprompt_rs::{Config, server::HttpServer};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_file("config/lynxprompt.yaml").await?;
//!     let server = HttpServer::new(&config).await?;
//!     server.start().await?;
//!     Ok(())
//! }
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

// Public module exports
pub mod auth;
pub mod config;
pub mod core;
pub mod sdk;
pub mod server;
pub mod storage;
pub mod utils;

// Re-export main types
pub use config::Config;
pub use utils::error::{ApiError, Result};

pub use auth::{AuthContext, AuthSource, AuthSystem};
pub use core::models::api_token::{TokenAction, TokenRole, has_permission};
pub use sdk::LynxClient;

// Version information
/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
/// Description of the crate
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Service build information
#[derive(Debug, Clone)]
pub struct BuildInfo {
    /// Version number
    pub version: &'static str,
    /// Build time
    pub build_time: &'static str,
    /// Git commit hash
    pub git_hash: &'static str,
    /// Rust version
    pub rust_version: &'static str,
}

impl Default for BuildInfo {
    fn default() -> Self {
        Self {
            version: VERSION,
            build_time: "unknown",
            git_hash: "unknown",
            rust_version: "unknown",
        }
    }
}

/// Build information for the running binary
pub fn build_info() -> BuildInfo {
    BuildInfo::default()
}
