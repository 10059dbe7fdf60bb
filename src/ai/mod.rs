//! Provider request shape and HTTP client

pub mod client;
pub mod prompt;

// Re-export main types for convenience
pub use client::{ChatCompletionBody, ChatCompletionClient, OpenAiClient};
pub use prompt::ExternalChatRequest;
