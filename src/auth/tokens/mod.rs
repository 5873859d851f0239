//! API token service
//!
//! This module provides token creation, verification and revocation.

pub mod service;

pub use service::{
    ApiTokenService, AuthenticatedToken, CreateTokenOutcome, CreateTokenParams, RevokeOutcome,
};
