//! Account and browser session service
//!
//! This module provides registration, login and session validation.

pub mod service;

pub use service::{RegisterOutcome, SessionService};
