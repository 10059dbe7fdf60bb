//! API Lambda handler - thin router on the form field `action`.
//!
//! This module handles:
//! - Request validation (method, body decoding)
//! - Content improvement (delegated to `features::improve`)
//! - Settings writes, gated by the configured admin token (delegated to
//!   `core::options`)
//!
//! The stored API key is never returned by this endpoint.

use std::sync::Arc;

use lambda_runtime::{Error, LambdaEvent};
use serde_json::{Value, json};
use tracing::{error, info};
use uuid::Uuid;

use super::{helpers, parsing};
use crate::ai::{ChatCompletionClient, OpenAiClient};
use crate::core::config::AppConfig;
use crate::core::options::{OptionStore, SsmOptionStore, save_api_key};
use crate::errors::AppError;
use crate::features::ContentImprover;

pub const IMPROVE_ACTION: &str = "chatgpt_improve_content";
pub const UPDATE_SETTINGS_ACTION: &str = "chatgpt_update_settings";
pub const ADMIN_TOKEN_HEADER: &str = "X-Admin-Token";

/// Long-lived pieces shared by every invocation on one Lambda instance.
pub struct ApiState<C = OpenAiClient> {
    pub config: AppConfig,
    pub improver: ContentImprover<C>,
    pub options: Arc<dyn OptionStore>,
}

impl ApiState<OpenAiClient> {
    /// Wires the real provider client and the SSM option store.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub async fn from_config(config: AppConfig) -> Result<Self, AppError> {
        let client = OpenAiClient::new(config.openai_api_url.clone())?;
        let options = SsmOptionStore::from_env(&config).await;
        Ok(Self {
            config,
            improver: ContentImprover::new(client),
            options: Arc::new(options),
        })
    }
}

impl<C: ChatCompletionClient> ApiState<C> {
    #[must_use]
    pub fn new(config: AppConfig, client: C, options: Arc<dyn OptionStore>) -> Self {
        Self {
            config,
            improver: ContentImprover::new(client),
            options,
        }
    }
}

/// Lambda handler for the API entrypoint.
///
/// # Errors
///
/// Never fails for a bad request; those become 4xx responses. The `Result`
/// is required by the runtime.
#[tracing::instrument(level = "info", skip_all)]
pub async fn function_handler<C: ChatCompletionClient>(
    state: &ApiState<C>,
    event: LambdaEvent<Value>,
) -> Result<Value, Error> {
    Ok(route_request(state, &event.payload).await)
}

/// Routes one HTTP-trigger payload and returns the response payload.
pub async fn route_request<C: ChatCompletionClient>(state: &ApiState<C>, payload: &Value) -> Value {
    let correlation_id = Uuid::new_v4().to_string();

    // ========================================================================
    // Request validation
    // ========================================================================

    if let Some(method) = parsing::request_method(payload) {
        if !method.eq_ignore_ascii_case("POST") {
            info!(correlation_id = %correlation_id, method = %method, "Rejecting non-POST request");
            return helpers::err_response(405, "Method not allowed");
        }
    }

    let form = match parsing::extract_body(payload).and_then(|b| parsing::parse_form_data(&b)) {
        Ok(form) => form,
        Err(e) => {
            error!(correlation_id = %correlation_id, "Request body parse error: {}", e);
            return helpers::err_response(400, &format!("Parse Error: {e}"));
        }
    };

    let action = form.get("action").map(String::as_str).unwrap_or_default();
    info!(correlation_id = %correlation_id, action = %action, "API Lambda received request");

    // ========================================================================
    // Route on action
    // ========================================================================

    match action {
        IMPROVE_ACTION => {
            let request = parsing::improvement_request_from_form(&form);
            let response = state.improver.improve(&request).await;
            info!(
                correlation_id = %correlation_id,
                success = response.is_success(),
                "Improvement request finished"
            );
            match serde_json::to_value(&response) {
                Ok(body) => helpers::ok_json(&body),
                Err(e) => {
                    error!(correlation_id = %correlation_id, "Failed to encode response: {}", e);
                    helpers::err_response(500, "Failed to encode response")
                }
            }
        }
        UPDATE_SETTINGS_ACTION => {
            let token = payload
                .get("headers")
                .and_then(|h| parsing::get_header_value(h, ADMIN_TOKEN_HEADER));
            if !state.config.is_admin(token) {
                info!(correlation_id = %correlation_id, "Rejecting settings update without admin token");
                return helpers::err_response(403, "Forbidden");
            }

            let raw = form.get("api_key").map(String::as_str).unwrap_or_default();
            match save_api_key(state.options.as_ref(), raw).await {
                Ok(_) => helpers::ok_envelope(&json!({ "message": "Settings saved." })),
                Err(e) => {
                    error!(correlation_id = %correlation_id, "Failed to save settings: {}", e);
                    helpers::err_response(500, "Failed to save settings")
                }
            }
        }
        _ => helpers::err_response(400, "Unknown action"),
    }
}
