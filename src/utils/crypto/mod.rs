//! Cryptographic utilities
//!
//! Token generation and hashing, pairing session identifiers, and Argon2
//! password handling.

pub mod password;
pub mod tokens;

pub use password::{hash_password, verify_password};
pub use tokens::{
    API_TOKEN_LEN, API_TOKEN_PREFIX, GeneratedToken, generate_api_token,
    generate_browser_session_token, generate_pairing_session_id, hash_api_token,
    is_well_formed_token,
};
