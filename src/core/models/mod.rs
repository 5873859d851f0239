//! Core data models for the service
//!
//! This module defines the domain data structures used throughout the service.

pub mod api_token;
pub mod blueprint;
pub mod cli_session;
pub mod user;

// Re-export commonly used types
pub use api_token::*;
pub use blueprint::*;
pub use cli_session::*;
pub use user::*;
