use thiserror::Error;

pub const MISSING_CONTENT_MESSAGE: &str = "Post content is missing.";
pub const MISSING_API_KEY_MESSAGE: &str = "API key is missing.";
pub const UPSTREAM_UNAVAILABLE_MESSAGE: &str = "Error contacting API.";
pub const EMPTY_IMPROVEMENT_MESSAGE: &str = "No improvement from ChatGPT.";

/// Failure classes of a single improvement request.
///
/// None of these are retried; each one ends the request it belongs to.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ImprovementError {
    #[error("post content is missing")]
    MissingContent,

    #[error("API key is missing")]
    MissingApiKey,

    #[error("upstream provider unavailable: {0}")]
    UpstreamUnavailable(String),

    #[error("upstream provider returned no usable text")]
    EmptyImprovement,
}

impl ImprovementError {
    /// Short human-readable text shown to the editor.
    ///
    /// Transport details stay in the logs; the editor only sees the generic
    /// message.
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        match self {
            ImprovementError::MissingContent => MISSING_CONTENT_MESSAGE,
            ImprovementError::MissingApiKey => MISSING_API_KEY_MESSAGE,
            ImprovementError::UpstreamUnavailable(_) => UPSTREAM_UNAVAILABLE_MESSAGE,
            ImprovementError::EmptyImprovement => EMPTY_IMPROVEMENT_MESSAGE,
        }
    }
}

impl From<reqwest::Error> for ImprovementError {
    fn from(error: reqwest::Error) -> Self {
        ImprovementError::UpstreamUnavailable(error.to_string())
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Failed to parse request: {0}")]
    ParseError(String),

    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    #[error("Failed to interact with AWS services: {0}")]
    AwsError(String),

    #[error("Failed to send HTTP request: {0}")]
    HttpError(String),

    #[error("{0}")]
    GeneralError(String),
}

impl From<reqwest::Error> for AppError {
    fn from(error: reqwest::Error) -> Self {
        AppError::HttpError(error.to_string())
    }
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        AppError::GeneralError(error.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        AppError::ParseError(error.to_string())
    }
}
