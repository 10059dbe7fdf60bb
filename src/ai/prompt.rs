//! Fixed-shape chat request sent to the provider.

use openai_api_rs::v1::chat_completion::{ChatCompletionMessage, Content, MessageRole};
use serde_json::{Value, json};

pub const CHAT_MODEL: &str = "gpt-3.5-turbo";
pub const SYSTEM_INSTRUCTION: &str = "You are a helpful assistant.";
pub const IMPROVE_PREFIX: &str = "Improve this content: ";
pub const MAX_TOKENS: u32 = 500;
pub const TEMPERATURE: f64 = 0.7;

/// Chat completion request for one improvement.
///
/// Everything except the embedded content is constant.
#[derive(Debug)]
pub struct ExternalChatRequest {
    pub model: &'static str,
    pub messages: Vec<ChatCompletionMessage>,
    pub max_tokens: u32,
    pub temperature: f64,
}

impl ExternalChatRequest {
    /// The content is embedded verbatim; JSON encoding is the only escaping.
    #[must_use]
    pub fn for_content(content: &str) -> Self {
        Self {
            model: CHAT_MODEL,
            messages: vec![
                ChatCompletionMessage {
                    role: MessageRole::system,
                    content: Content::Text(SYSTEM_INSTRUCTION.to_string()),
                    name: None,
                    tool_calls: None,
                    tool_call_id: None,
                },
                ChatCompletionMessage {
                    role: MessageRole::user,
                    content: Content::Text(format!("{IMPROVE_PREFIX}{content}")),
                    name: None,
                    tool_calls: None,
                    tool_call_id: None,
                },
            ],
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
        }
    }

    /// Request body for the chat-completions endpoint.
    #[must_use]
    pub fn to_json(&self) -> Value {
        let messages: Vec<Value> = self
            .messages
            .iter()
            .filter_map(|m| {
                let role_str = match m.role {
                    MessageRole::system => "system",
                    MessageRole::user | MessageRole::function | MessageRole::tool => "user",
                    MessageRole::assistant => "assistant",
                };

                match &m.content {
                    Content::Text(t) => Some(json!({
                        "role": role_str,
                        "content": t
                    })),
                    Content::ImageUrl(_) => None,
                }
            })
            .collect();

        json!({
            "model": self.model,
            "messages": messages,
            "max_tokens": self.max_tokens,
            "temperature": self.temperature
        })
    }
}
