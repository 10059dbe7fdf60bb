use tracing::{error, info, warn};

use crate::ai::{ChatCompletionClient, ExternalChatRequest};
use crate::core::models::{ImprovementRequest, ImprovementResponse};
use crate::errors::ImprovementError;

/// Server-side proxy between the editor and the chat-completion provider.
///
/// Holds no per-request state; the API key arrives with each request.
pub struct ContentImprover<C> {
    client: C,
}

impl<C: ChatCompletionClient> ContentImprover<C> {
    #[must_use]
    pub fn new(client: C) -> Self {
        Self { client }
    }

    /// Validates the request, calls the provider once and returns the
    /// envelope for the editor.
    pub async fn improve(&self, request: &ImprovementRequest) -> ImprovementResponse {
        match self.try_improve(request).await {
            Ok(improved_text) => ImprovementResponse::Improved { improved_text },
            Err(e) => {
                match &e {
                    ImprovementError::UpstreamUnavailable(detail) => {
                        error!("Improvement failed: {}", detail);
                    }
                    other => warn!("Improvement rejected: {}", other),
                }
                e.into()
            }
        }
    }

    /// Validation order is content first, then API key; both short-circuit
    /// before any outbound call.
    ///
    /// # Errors
    ///
    /// Returns the `ImprovementError` describing why no text was produced.
    pub async fn try_improve(&self, request: &ImprovementRequest) -> Result<String, ImprovementError> {
        let content = request
            .content
            .as_deref()
            .filter(|c| !c.trim().is_empty())
            .ok_or(ImprovementError::MissingContent)?;

        let api_key = request
            .api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or(ImprovementError::MissingApiKey)?;

        let chat_request = ExternalChatRequest::for_content(content);
        info!(content_chars = content.chars().count(), "Requesting content improvement");

        let body = self.client.complete(api_key, &chat_request).await?;

        body.first_content()
            .filter(|text| !text.trim().is_empty())
            .map(ToString::to_string)
            .ok_or(ImprovementError::EmptyImprovement)
    }
}
