//! Error handling for the LynxPrompt core service
//!
//! This module defines all error types used throughout the service.

#![allow(missing_docs)]

use actix_web::{HttpResponse, ResponseError};
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Result type alias for the service
pub type Result<T> = std::result::Result<T, ApiError>;

/// Main error type for the service
#[derive(Error, Debug)]
pub enum ApiError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Database errors
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Authentication errors
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Expired bearer token, carries the expiry so clients can explain it
    #[error("Token expired at {expired_at}")]
    TokenExpired { expired_at: DateTime<Utc> },

    /// Browser session errors
    #[error("Session error: {0}")]
    Session(String),

    /// Authorization errors
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Bad request errors
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Not found errors
    #[error("Not found: {0}")]
    NotFound(String),

    /// Conflict errors
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Gone errors, used for expired pairing sessions
    #[error("Gone: {0}")]
    Gone(String),

    /// Rate limiting errors
    #[error("Rate limit exceeded: {0}")]
    RateLimit(String),

    /// Crypto errors
    #[error("Crypto error: {0}")]
    Crypto(String),

    /// Migration errors
    #[error("Migration error: {0}")]
    Migration(String),

    /// Internal server errors
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ApiError {
    fn status(&self) -> actix_web::http::StatusCode {
        use actix_web::http::StatusCode;

        match self {
            ApiError::Auth(_) | ApiError::TokenExpired { .. } | ApiError::Session(_) => {
                StatusCode::UNAUTHORIZED
            }
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::Validation(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Gone(_) => StatusCode::GONE,
            ApiError::RateLimit(_) => StatusCode::TOO_MANY_REQUESTS,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        self.status()
    }

    fn error_response(&self) -> HttpResponse {
        let (error_code, message, expired_at) = match self {
            ApiError::Config(_) => ("CONFIG_ERROR", self.to_string(), None),
            ApiError::Database(_) => (
                "DATABASE_ERROR",
                "Database operation failed".to_string(),
                None,
            ),
            ApiError::Auth(_) => ("AUTH_ERROR", self.to_string(), None),
            ApiError::TokenExpired { expired_at } => (
                "TOKEN_EXPIRED",
                "API token has expired".to_string(),
                Some(*expired_at),
            ),
            ApiError::Session(_) => ("SESSION_ERROR", self.to_string(), None),
            ApiError::Forbidden(_) => ("FORBIDDEN", self.to_string(), None),
            ApiError::Validation(_) => ("VALIDATION_ERROR", self.to_string(), None),
            ApiError::BadRequest(_) => ("BAD_REQUEST", self.to_string(), None),
            ApiError::NotFound(_) => ("NOT_FOUND", self.to_string(), None),
            ApiError::Conflict(_) => ("CONFLICT", self.to_string(), None),
            ApiError::Gone(_) => ("GONE", self.to_string(), None),
            ApiError::RateLimit(_) => ("RATE_LIMIT_EXCEEDED", self.to_string(), None),
            _ => (
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
                None,
            ),
        };

        let error_response = ErrorResponse {
            error: ErrorDetail {
                code: error_code.to_string(),
                message,
                timestamp: chrono::Utc::now().timestamp(),
                expired_at,
                request_id: None, // This should be set by middleware
            },
        };

        HttpResponse::build(self.status()).json(error_response)
    }
}

/// Standard error response format
#[derive(serde::Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Error detail structure
#[derive(serde::Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    pub timestamp: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expired_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

/// Helper functions for creating specific errors
impl ApiError {
    pub fn auth<S: Into<String>>(message: S) -> Self {
        Self::Auth(message.into())
    }

    pub fn token_expired(expired_at: DateTime<Utc>) -> Self {
        Self::TokenExpired { expired_at }
    }

    pub fn session<S: Into<String>>(message: S) -> Self {
        Self::Session(message.into())
    }

    pub fn forbidden<S: Into<String>>(message: S) -> Self {
        Self::Forbidden(message.into())
    }

    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation(message.into())
    }

    pub fn bad_request<S: Into<String>>(message: S) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn not_found<S: Into<String>>(message: S) -> Self {
        Self::NotFound(message.into())
    }

    pub fn conflict<S: Into<String>>(message: S) -> Self {
        Self::Conflict(message.into())
    }

    pub fn gone<S: Into<String>>(message: S) -> Self {
        Self::Gone(message.into())
    }

    pub fn rate_limit<S: Into<String>>(message: S) -> Self {
        Self::RateLimit(message.into())
    }

    pub fn crypto<S: Into<String>>(message: S) -> Self {
        Self::Crypto(message.into())
    }

    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal(message.into())
    }
}
