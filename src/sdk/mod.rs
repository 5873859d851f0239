//! LynxPrompt client SDK
//!
//! A typed client for the LynxPrompt HTTP API. The `lynx` CLI is built
//! on it, and it is suitable for embedding in other tools.

pub mod client;
pub mod errors;
pub mod types;

// Re-exports for convenience
pub use client::LynxClient;
pub use errors::{Result, SDKError};
pub use types::{ApiEnvelope, CliAuthPoll, NewBlueprint, ServiceHealth};

/// SDK version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
