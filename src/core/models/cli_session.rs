//! CLI pairing session state

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::user::UserSummary;

/// Lifecycle state of a pairing session
///
/// The only legal transition is `Pending` to `Completed`, applied by a
/// conditional update so concurrent callbacks cannot both win. Expiry is
/// not a stored state; it is evaluated against the wall clock wherever
/// the session is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PairingStatus {
    /// Waiting for the browser-side callback
    Pending,
    /// Token minted and attached, waiting for the CLI to collect it
    Completed,
}

impl PairingStatus {
    /// Storage representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PairingStatus::Pending => "PENDING",
            PairingStatus::Completed => "COMPLETED",
        }
    }
}

impl std::fmt::Display for PairingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for PairingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(PairingStatus::Pending),
            "COMPLETED" => Ok(PairingStatus::Completed),
            _ => Err(format!("Invalid pairing status: {}", s)),
        }
    }
}

/// What `init` hands back to the CLI
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PairingInit {
    /// Unguessable session handle
    pub session_id: String,
    /// Sign-in page URL with the session id embedded
    pub auth_url: String,
    /// When the pending session lapses
    pub expires_at: DateTime<Utc>,
}

/// Result of a poll, as seen by the CLI
///
/// `Completed` is the one response that ever carries the raw token; the
/// token field is already cleared from storage by the time the caller
/// sees this value.
#[derive(Debug, Clone, PartialEq)]
pub enum PollOutcome {
    /// Callback has not happened yet, keep polling
    Pending,
    /// Pairing succeeded
    Completed {
        /// Raw API token, disclosed exactly once. None on duplicate polls
        /// that land inside the grace window after disclosure.
        token: Option<String>,
        /// Owner of the minted token
        user: UserSummary,
    },
    /// Session lapsed or never existed; stop polling
    Expired,
}
