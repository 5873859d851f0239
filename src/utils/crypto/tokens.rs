//! API token and session identifier generation
//!
//! Tokens are opaque bearer credentials of the form `lp_` followed by 64
//! lowercase hex characters. Only the SHA-256 hash of the full prefixed
//! token is ever persisted; the raw value is handed to the caller once.

use once_cell::sync::Lazy;
use rand::RngCore;
use regex::Regex;
use sha2::{Digest, Sha256};

use base64::{Engine as _, engine::general_purpose};

/// Prefix on every API token, makes leaked tokens greppable in logs
pub const API_TOKEN_PREFIX: &str = "lp_";

/// Random bytes drawn per token (256 bits of entropy)
pub const API_TOKEN_RANDOM_BYTES: usize = 32;

/// Hex length of the random portion
pub const API_TOKEN_HEX_LEN: usize = API_TOKEN_RANDOM_BYTES * 2;

/// Total wire length: prefix + hex portion
pub const API_TOKEN_LEN: usize = API_TOKEN_PREFIX.len() + API_TOKEN_HEX_LEN;

/// Random bytes per CLI pairing session identifier
pub const PAIRING_SESSION_ID_BYTES: usize = 32;

static API_TOKEN_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^lp_[0-9a-f]{64}$").expect("token pattern is valid"));

/// Product of [`generate_api_token`]
///
/// `raw` must reach the end user exactly once and never storage or logs.
#[derive(Debug, Clone)]
pub struct GeneratedToken {
    /// Full prefixed secret, disclosed once
    pub raw: String,
    /// SHA-256 hex digest of `raw`, the only persisted form
    pub hash: String,
    /// Last 4 hex chars of the random portion, for display
    pub last_four: String,
}

/// Generate a new API token
///
/// Pure computation. Persisting the hash is the caller's job.
pub fn generate_api_token() -> GeneratedToken {
    let mut bytes = [0u8; API_TOKEN_RANDOM_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);

    let random_part = hex::encode(bytes);
    let raw = format!("{}{}", API_TOKEN_PREFIX, random_part);
    let hash = hash_api_token(&raw);
    let last_four = random_part[random_part.len() - 4..].to_string();

    GeneratedToken {
        raw,
        hash,
        last_four,
    }
}

/// Hash an API token for storage or lookup
pub fn hash_api_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}

/// Check the wire format of a presented token
///
/// Cheap rejection of malformed input before any database access.
pub fn is_well_formed_token(token: &str) -> bool {
    token.len() == API_TOKEN_LEN && API_TOKEN_PATTERN.is_match(token)
}

/// Generate an unguessable CLI pairing session identifier
///
/// Same entropy standard as API tokens, but no prefix: session ids are
/// capabilities, not credentials, and never pass through token validation.
pub fn generate_pairing_session_id() -> String {
    let mut bytes = [0u8; PAIRING_SESSION_ID_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Generate an opaque browser session token for the cookie value
pub fn generate_browser_session_token() -> String {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    general_purpose::URL_SAFE_NO_PAD.encode(bytes)
}
