//! SDK data types
//!
//! Wire-level views of the service responses. Types shared with the
//! server (users, tokens, blueprints, pairing) are re-used directly from
//! [`crate::core::models`].

use crate::core::models::user::UserSummary;
use crate::sdk::errors::SDKError;
use serde::{Deserialize, Serialize};

/// Standard success envelope wrapping every 2xx payload
#[derive(Debug, Deserialize)]
pub struct ApiEnvelope<T> {
    /// Always true on the success path
    pub success: bool,
    /// The payload, absent on bare acknowledgements
    pub data: Option<T>,
    /// Error text, unused on the success path
    pub error: Option<String>,
}

/// Health report from `GET /health`
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceHealth {
    /// "healthy" or "degraded"
    pub status: String,
    /// "up" or "down"
    pub database: String,
    /// Server-side timestamp
    pub timestamp: chrono::DateTime<chrono::Utc>,
    /// Service version
    pub version: String,
}

impl ServiceHealth {
    /// Whether the service reported itself fully operational
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}

/// Error body returned by the service on non-2xx responses
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub error: ErrorBodyDetail,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBodyDetail {
    pub code: String,
    pub message: String,
}

/// One observation of a pairing session
#[derive(Debug, Clone, PartialEq)]
pub enum CliAuthPoll {
    /// The browser side has not confirmed yet, keep polling
    Pending,
    /// Pairing finished. `token` is present on the first completed poll
    /// only; later polls inside the grace window see `None`.
    Completed {
        /// Raw API token, disclosed once
        token: Option<String>,
        /// Owner of the minted token
        user: UserSummary,
    },
    /// Session lapsed or never existed, start over
    Expired,
}

/// Wire shape of the poll response
#[derive(Debug, Deserialize)]
pub(crate) struct PollPayload {
    pub status: String,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user: Option<UserSummary>,
}

impl TryFrom<PollPayload> for CliAuthPoll {
    type Error = SDKError;

    fn try_from(payload: PollPayload) -> Result<Self, Self::Error> {
        match payload.status.as_str() {
            "pending" => Ok(CliAuthPoll::Pending),
            "expired" => Ok(CliAuthPoll::Expired),
            "completed" => {
                let user = payload.user.ok_or_else(|| {
                    SDKError::UnexpectedResponse(
                        "Completed poll response is missing the user".to_string(),
                    )
                })?;
                Ok(CliAuthPoll::Completed {
                    token: payload.token,
                    user,
                })
            }
            other => Err(SDKError::UnexpectedResponse(format!(
                "Unknown poll status: {}",
                other
            ))),
        }
    }
}

/// Fields for creating a blueprint
#[derive(Debug, Clone, Serialize)]
pub struct NewBlueprint {
    /// Human-readable name, also the source of the slug
    pub name: String,
    /// Short description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// The configuration file body
    pub content: String,
    /// "PUBLIC" or "PRIVATE", service defaults to private
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<String>,
}
