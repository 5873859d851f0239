//! Error handling utilities

pub mod error;

// Re-export commonly used types and functions
pub use error::*;
