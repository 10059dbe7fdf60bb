#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use content_improver::ai::{ChatCompletionBody, ChatCompletionClient, ExternalChatRequest};
use content_improver::errors::ImprovementError;
use serde_json::Value;

/// Completion client that records calls and returns a canned reply.
#[derive(Clone)]
pub struct FakeClient {
    calls: Arc<AtomicUsize>,
    last_request: Arc<Mutex<Option<(String, Value)>>>,
    reply: Result<ChatCompletionBody, ImprovementError>,
}

impl FakeClient {
    pub fn replying(raw_json: &str) -> Self {
        let body: ChatCompletionBody = serde_json::from_str(raw_json).unwrap();
        Self::with_reply(Ok(body))
    }

    pub fn failing(detail: &str) -> Self {
        Self::with_reply(Err(ImprovementError::UpstreamUnavailable(detail.to_string())))
    }

    fn with_reply(reply: Result<ChatCompletionBody, ImprovementError>) -> Self {
        Self {
            calls: Arc::new(AtomicUsize::new(0)),
            last_request: Arc::new(Mutex::new(None)),
            reply,
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// API key and JSON body of the most recent call.
    pub fn last_request(&self) -> Option<(String, Value)> {
        self.last_request.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatCompletionClient for FakeClient {
    async fn complete(
        &self,
        api_key: &str,
        request: &ExternalChatRequest,
    ) -> Result<ChatCompletionBody, ImprovementError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some((api_key.to_string(), request.to_json()));
        self.reply.clone()
    }
}

pub const CAT_REPLY: &str =
    r#"{"choices":[{"message":{"content":"The cat sat quietly on the mat."}}]}"#;
