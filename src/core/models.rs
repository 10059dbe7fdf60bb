use serde::{Deserialize, Serialize};

use crate::errors::ImprovementError;

/// Content and credentials submitted by the editor for one improvement.
///
/// Fields are optional because the form may omit them; absence and an empty
/// value are rejected the same way by the proxy.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImprovementRequest {
    pub content: Option<String>,
    pub api_key: Option<String>,
}

impl ImprovementRequest {
    #[must_use]
    pub fn new(content: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            api_key: Some(api_key.into()),
        }
    }
}

/// Outcome of one improvement request, as seen by the editor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "ResponseEnvelope", try_from = "ResponseEnvelope")]
pub enum ImprovementResponse {
    Improved { improved_text: String },
    Failed { message: String },
}

impl ImprovementResponse {
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, ImprovementResponse::Improved { .. })
    }
}

impl From<ImprovementError> for ImprovementResponse {
    fn from(error: ImprovementError) -> Self {
        ImprovementResponse::Failed {
            message: error.user_message().to_string(),
        }
    }
}

/// Wire shape: `{"success": bool, "data": {...}}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    pub success: bool,
    pub data: EnvelopeData,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EnvelopeData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub improved_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl From<ImprovementResponse> for ResponseEnvelope {
    fn from(response: ImprovementResponse) -> Self {
        match response {
            ImprovementResponse::Improved { improved_text } => ResponseEnvelope {
                success: true,
                data: EnvelopeData {
                    improved_text: Some(improved_text),
                    message: None,
                },
            },
            ImprovementResponse::Failed { message } => ResponseEnvelope {
                success: false,
                data: EnvelopeData {
                    improved_text: None,
                    message: Some(message),
                },
            },
        }
    }
}

impl TryFrom<ResponseEnvelope> for ImprovementResponse {
    type Error = String;

    fn try_from(envelope: ResponseEnvelope) -> Result<Self, Self::Error> {
        match (envelope.success, envelope.data) {
            (
                true,
                EnvelopeData {
                    improved_text: Some(improved_text),
                    ..
                },
            ) => Ok(ImprovementResponse::Improved { improved_text }),
            (true, _) => Err("success envelope without improved_text".to_string()),
            (false, EnvelopeData { message, .. }) => Ok(ImprovementResponse::Failed {
                message: message.unwrap_or_default(),
            }),
        }
    }
}
