//! User models
//!
//! This module defines user-related data structures.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Subscription plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Plan {
    /// Free tier
    #[default]
    Free,
    /// Individual paid tier
    Pro,
    /// Team tier
    Team,
}

impl Plan {
    /// Storage representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Plan::Free => "FREE",
            Plan::Pro => "PRO",
            Plan::Team => "TEAM",
        }
    }
}

impl std::fmt::Display for Plan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Plan {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "FREE" => Ok(Plan::Free),
            "PRO" => Ok(Plan::Pro),
            "TEAM" => Ok(Plan::Team),
            _ => Err(format!("Invalid plan: {}", s)),
        }
    }
}

/// Minimal public subset of a user
///
/// This is what the pairing poll hands to the CLI and what token
/// validation attaches to a request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserSummary {
    /// User id
    pub id: Uuid,
    /// Email address
    pub email: String,
    /// Display name
    pub name: String,
    /// Subscription plan
    pub plan: Plan,
}

/// Full profile returned by `/v1/user`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    /// User id
    pub id: Uuid,
    /// Email address
    pub email: String,
    /// Display name
    pub name: String,
    /// Subscription plan
    pub plan: Plan,
    /// Account creation time
    pub created_at: chrono::DateTime<chrono::Utc>,
    /// Number of blueprints owned
    pub blueprint_count: u64,
    /// Number of non-revoked API tokens
    pub api_token_count: u64,
}
