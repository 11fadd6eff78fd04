//! Snowflake SQL API transport.
//!
//! Implements the StatementTransport trait over HTTPS using programmatic
//! access token authentication.

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use crate::api::types::{ExecutionRequest, ExecutionResult};
use crate::api::StatementTransport;
use crate::error::{Result, VqError};

/// Default timeout for a single HTTP request.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Token type header value for programmatic access tokens.
const TOKEN_TYPE: &str = "PROGRAMMATIC_ACCESS_TOKEN";

/// Header carrying the token type.
const TOKEN_TYPE_HEADER: &str = "X-Snowflake-Authorization-Token-Type";

/// SQL API client.
#[derive(Clone)]
pub struct SqlApiClient {
    endpoint: String,
    token: String,
    client: Client,
}

impl std::fmt::Debug for SqlApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqlApiClient")
            .field("endpoint", &self.endpoint)
            .field("token", &"<redacted>")
            .finish()
    }
}

impl SqlApiClient {
    /// Creates a client for the given statements endpoint.
    ///
    /// `endpoint` is the full `.../api/v2/statements` URL.
    pub fn new(
        endpoint: impl Into<String>,
        token: impl Into<String>,
        timeout_secs: u64,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| VqError::transport(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            endpoint: endpoint.into(),
            token: token.into(),
            client,
        })
    }

    /// Returns the status URL for a statement handle.
    fn status_url(&self, handle: &str) -> String {
        format!("{}/{}", self.endpoint.trim_end_matches('/'), handle)
    }

    fn with_auth(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .header("Authorization", format!("Bearer {}", self.token))
            .header("Content-Type", "application/json")
            .header("Accept", "application/json")
            .header(TOKEN_TYPE_HEADER, TOKEN_TYPE)
    }

    /// Maps a reqwest send error to a transport error.
    fn request_error(e: reqwest::Error) -> VqError {
        if e.is_timeout() {
            VqError::transport("Request timed out")
        } else if e.is_connect() {
            VqError::transport(format!("Failed to connect to the SQL API: {}", e))
        } else {
            VqError::transport(format!("Request failed: {}", e))
        }
    }

    /// Builds an error from a non-success status and its body.
    fn parse_error(status: StatusCode, body: &str) -> VqError {
        if status == StatusCode::UNAUTHORIZED {
            return VqError::http(
                status.as_u16(),
                "Authentication failed. Check SNOWFLAKE_PAT.",
            );
        }

        if let Ok(error) = serde_json::from_str::<SqlApiError>(body) {
            if let Some(message) = error.message {
                let message = match error.code {
                    Some(code) => format!("{} (code {})", message, code),
                    None => message,
                };
                return VqError::http(status.as_u16(), message);
            }
        }

        let body = body.trim();
        if body.is_empty() {
            VqError::http(status.as_u16(), status.to_string())
        } else {
            VqError::http(status.as_u16(), body.to_string())
        }
    }

    /// Reads a response into an ExecutionResult, rejecting error statuses.
    async fn read_result(response: Response) -> Result<ExecutionResult> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| VqError::transport(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            return Err(Self::parse_error(status, &body));
        }

        debug!("SQL API responded with {}", status);

        serde_json::from_str(&body)
            .map_err(|e| VqError::malformed(format!("Failed to parse response: {}", e)))
    }
}

#[async_trait]
impl StatementTransport for SqlApiClient {
    async fn submit(&self, request: &ExecutionRequest) -> Result<ExecutionResult> {
        debug!("POST {}", self.endpoint);
        let response = self
            .with_auth(self.client.post(&self.endpoint))
            .json(request)
            .send()
            .await
            .map_err(Self::request_error)?;

        Self::read_result(response).await
    }

    async fn poll(&self, handle: &str) -> Result<ExecutionResult> {
        let url = self.status_url(handle);
        debug!("GET {}", url);
        let response = self
            .with_auth(self.client.get(&url))
            .send()
            .await
            .map_err(Self::request_error)?;

        Self::read_result(response).await
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SqlApiError {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
}
