//! LLM (`OpenAI`) API client module
//!
//! One bounded chat-completions call per improvement. No retries.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info, warn};

use super::prompt::ExternalChatRequest;
use crate::core::config::DEFAULT_OPENAI_API_URL;
use crate::errors::{AppError, ImprovementError};

pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Provider response; only `choices[0].message.content` is consumed.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatCompletionBody {
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatChoice {
    #[serde(default)]
    pub message: Option<ChatChoiceMessage>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatChoiceMessage {
    #[serde(default)]
    pub content: Option<String>,
}

impl ChatCompletionBody {
    #[must_use]
    pub fn first_content(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|c| c.message.as_ref())
            .and_then(|m| m.content.as_deref())
    }
}

/// Seam between the proxy and the provider.
#[async_trait]
pub trait ChatCompletionClient: Send + Sync {
    /// # Errors
    ///
    /// Returns `UpstreamUnavailable` when the provider cannot be reached or
    /// answers with a non-2xx status and no JSON body.
    async fn complete(
        &self,
        api_key: &str,
        request: &ExternalChatRequest,
    ) -> Result<ChatCompletionBody, ImprovementError>;
}

pub struct OpenAiClient {
    http: Client,
    api_url: String,
}

impl OpenAiClient {
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(api_url: impl Into<String>) -> Result<Self, AppError> {
        Self::with_timeout(api_url, REQUEST_TIMEOUT)
    }

    /// Same as [`OpenAiClient::new`] with a custom request bound.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn with_timeout(api_url: impl Into<String>, timeout: Duration) -> Result<Self, AppError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::HttpError(format!("Failed to build OpenAI HTTP client: {e}")))?;

        Ok(Self {
            http,
            api_url: api_url.into(),
        })
    }

    /// Client for the public chat-completions endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn with_default_url() -> Result<Self, AppError> {
        Self::new(DEFAULT_OPENAI_API_URL)
    }

    #[must_use]
    pub fn api_url(&self) -> &str {
        &self.api_url
    }
}

#[async_trait]
impl ChatCompletionClient for OpenAiClient {
    async fn complete(
        &self,
        api_key: &str,
        request: &ExternalChatRequest,
    ) -> Result<ChatCompletionBody, ImprovementError> {
        let mut headers = reqwest::header::HeaderMap::new();
        let auth_value = format!("Bearer {api_key}").parse().map_err(|e| {
            ImprovementError::UpstreamUnavailable(format!("Invalid Authorization header: {e}"))
        })?;
        headers.insert("Authorization", auth_value);

        let content_type_value = "application/json".parse().map_err(|e| {
            ImprovementError::UpstreamUnavailable(format!("Invalid Content-Type header: {e}"))
        })?;
        headers.insert("Content-Type", content_type_value);

        info!(model = request.model, url = %self.api_url, "Sending improvement request to OpenAI");

        let response = self
            .http
            .post(&self.api_url)
            .headers(headers)
            .json(&request.to_json())
            .send()
            .await
            .map_err(|e| {
                ImprovementError::UpstreamUnavailable(format!("OpenAI API request failed: {e}"))
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            ImprovementError::UpstreamUnavailable(format!(
                "Failed to read OpenAI response body (status {status}): {e}"
            ))
        })?;

        #[cfg(feature = "debug-logs")]
        info!("OpenAI raw response (status {}):\n{}", status, body);

        #[cfg(not(feature = "debug-logs"))]
        debug!(status = %status, bytes = body.len(), "OpenAI response received");

        match serde_json::from_str::<ChatCompletionBody>(&body) {
            Ok(parsed) => {
                if !status.is_success() {
                    warn!(status = %status, "OpenAI API error: {}", body);
                }
                Ok(parsed)
            }
            Err(e) if !status.is_success() => Err(ImprovementError::UpstreamUnavailable(format!(
                "OpenAI API error (status {status}): {e}"
            ))),
            Err(e) => {
                warn!("Failed to parse OpenAI response: {}", e);
                Ok(ChatCompletionBody::default())
            }
        }
    }
}
