//! SDK error handling

use thiserror::Error;

/// Errors surfaced by [`LynxClient`](crate::sdk::LynxClient)
#[derive(Error, Debug)]
pub enum SDKError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Transport-level failures
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// The service answered with an error status
    #[error("API error {status} ({code}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Machine-readable error code from the response body
        code: String,
        /// Human-readable message from the response body
        message: String,
    },

    /// No token configured for an endpoint that needs one
    #[error("Authentication error: {0}")]
    AuthError(String),

    /// The service answered 2xx with a body the client cannot use
    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),
}

/// SDK result type
pub type Result<T> = std::result::Result<T, SDKError>;

impl SDKError {
    /// Whether this error indicates missing or rejected credentials
    pub fn is_auth_error(&self) -> bool {
        matches!(
            self,
            SDKError::AuthError(_) | SDKError::Api { status: 401, .. }
        )
    }

    /// Whether retrying the same request may succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            SDKError::HttpError(e) => e.is_timeout() || e.is_connect(),
            SDKError::Api { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }

    /// Error code reported by the service, if any
    pub fn api_code(&self) -> Option<&str> {
        match self {
            SDKError::Api { code, .. } => Some(code),
            _ => None,
        }
    }
}
