//! Core domain types for the LynxPrompt service
//!
//! This module contains the domain model shared by the token service,
//! the pairing protocol, and the HTTP layer.

pub mod models;
