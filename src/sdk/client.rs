//! LynxPrompt API client

use crate::core::models::blueprint::{BlueprintDetail, BlueprintSummary};
use crate::core::models::cli_session::PairingInit;
use crate::core::models::user::UserProfile;
use crate::sdk::errors::{Result, SDKError};
use crate::sdk::types::{ApiEnvelope, CliAuthPoll, ErrorBody, NewBlueprint, PollPayload, ServiceHealth};
use reqwest::Url;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;
use uuid::Uuid;

/// Default request timeout in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Client for the LynxPrompt HTTP API
///
/// Pairing and health endpoints work without credentials. Everything
/// else needs an API token attached via [`with_token`](Self::with_token).
#[derive(Debug, Clone)]
pub struct LynxClient {
    base_url: Url,
    http_client: reqwest::Client,
    token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct BlueprintListPayload {
    blueprints: Vec<BlueprintSummary>,
}

impl LynxClient {
    /// Create a client for the service at `base_url`
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| SDKError::ConfigError(format!("Invalid base URL: {}", e)))?;

        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .user_agent(concat!("lynxprompt-rs/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| SDKError::ConfigError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            base_url,
            http_client,
            token: None,
        })
    }

    /// Attach the API token used as the Bearer credential
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Whether a token is configured
    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| SDKError::ConfigError(format!("Invalid endpoint path {}: {}", path, e)))
    }

    fn bearer(&self) -> Result<&str> {
        self.token
            .as_deref()
            .ok_or_else(|| SDKError::AuthError("No API token configured".to_string()))
    }

    /// Unwrap a success envelope, or surface the service error body
    async fn take_data<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let status = response.status();
        if !status.is_success() {
            return Err(Self::error_from_response(response).await);
        }

        let envelope: ApiEnvelope<T> = response.json().await?;
        envelope.data.ok_or_else(|| {
            SDKError::UnexpectedResponse("Response envelope is missing data".to_string())
        })
    }

    async fn error_from_response(response: reqwest::Response) -> SDKError {
        let status = response.status().as_u16();
        match response.json::<ErrorBody>().await {
            Ok(body) => SDKError::Api {
                status,
                code: body.error.code,
                message: body.error.message,
            },
            Err(_) => SDKError::Api {
                status,
                code: "UNKNOWN".to_string(),
                message: format!("Request failed with status {}", status),
            },
        }
    }

    // ==================== Health ====================

    /// Check service health
    ///
    /// A degraded service answers 503 but still carries a report body, so
    /// both outcomes come back as `ServiceHealth` rather than an error.
    pub async fn health(&self) -> Result<ServiceHealth> {
        let response = self
            .http_client
            .get(self.endpoint("/health")?)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() || status == reqwest::StatusCode::SERVICE_UNAVAILABLE {
            let envelope: ApiEnvelope<ServiceHealth> = response.json().await?;
            envelope.data.ok_or_else(|| {
                SDKError::UnexpectedResponse("Health response is missing data".to_string())
            })
        } else {
            Err(Self::error_from_response(response).await)
        }
    }

    // ==================== CLI Pairing ====================

    /// Start a pairing session
    pub async fn init_cli_auth(&self) -> Result<PairingInit> {
        debug!("Starting CLI pairing session");

        let response = self
            .http_client
            .post(self.endpoint("/cli-auth/init")?)
            .send()
            .await?;
        Self::take_data(response).await
    }

    /// Poll a pairing session
    pub async fn poll_cli_auth(&self, session_id: &str) -> Result<CliAuthPoll> {
        let mut url = self.endpoint("/auth/cli/poll")?;
        url.query_pairs_mut().append_pair("session", session_id);

        let response = self.http_client.get(url).send().await?;
        let payload: PollPayload = Self::take_data(response).await?;
        CliAuthPoll::try_from(payload)
    }

    // ==================== Authenticated Endpoints ====================

    /// Fetch the profile of the token's owner
    ///
    /// Requires a token whose role grants `profile:read`.
    pub async fn current_user(&self) -> Result<UserProfile> {
        let response = self
            .http_client
            .get(self.endpoint("/v1/user")?)
            .bearer_auth(self.bearer()?)
            .send()
            .await?;
        Self::take_data(response).await
    }

    /// List blueprints visible to the token's owner
    pub async fn list_blueprints(&self) -> Result<Vec<BlueprintSummary>> {
        let response = self
            .http_client
            .get(self.endpoint("/v1/blueprints")?)
            .bearer_auth(self.bearer()?)
            .send()
            .await?;
        let payload: BlueprintListPayload = Self::take_data(response).await?;
        Ok(payload.blueprints)
    }

    /// Fetch one blueprint with its content
    pub async fn get_blueprint(&self, id: Uuid) -> Result<BlueprintDetail> {
        let response = self
            .http_client
            .get(self.endpoint(&format!("/v1/blueprints/{}", id))?)
            .bearer_auth(self.bearer()?)
            .send()
            .await?;
        Self::take_data(response).await
    }

    /// Create a blueprint
    pub async fn create_blueprint(&self, blueprint: &NewBlueprint) -> Result<BlueprintDetail> {
        let response = self
            .http_client
            .post(self.endpoint("/v1/blueprints")?)
            .bearer_auth(self.bearer()?)
            .json(blueprint)
            .send()
            .await?;
        Self::take_data(response).await
    }
}
