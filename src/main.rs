//! LynxPrompt core service
//!
//! Async HTTP service providing API tokens, CLI pairing and
//! session/token authentication

#![allow(missing_docs)]

use lynxprompt_rs::server;
use std::process::ExitCode;
use tracing::Level;

#[tokio::main]
async fn main() -> ExitCode {
    // Pick up DATABASE_URL and friends from a local .env during development
    let _ = dotenvy::dotenv();

    // Initialize logging system
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .with_target(false)
        .with_thread_ids(false)
        .init();

    // Start server (auto-loads config/lynxprompt.yaml)
    match server::builder::run_server().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Print error using Display (not Debug) to preserve newlines
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
