//! CLI device-pairing protocol
//!
//! This module implements the init / callback / poll pairing handshake.

pub mod service;

pub use service::{CallbackOutcome, PairingService};
