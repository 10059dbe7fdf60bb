//! Named option storage for the admin configuration surface.
//!
//! The only option in use is the provider API key. Deployments keep it in
//! SSM Parameter Store as a `SecureString`; tests and local runs use the
//! in-memory store.

use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_ssm::{Client as SsmClient, types::ParameterType};
use tokio::sync::RwLock;
use tracing::{debug, info};

use super::config::AppConfig;
use crate::errors::AppError;

/// Option name under which the provider API key is stored.
pub const API_KEY_OPTION: &str = "chatgpt_api_key";

#[async_trait]
pub trait OptionStore: Send + Sync {
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read.
    async fn get_option(&self, name: &str) -> Result<Option<String>, AppError>;

    /// Storing an empty value removes the option.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be written.
    async fn update_option(&self, name: &str, value: &str) -> Result<(), AppError>;
}

/// Strips control characters and surrounding whitespace from a submitted
/// single-line setting.
#[must_use]
pub fn sanitize_text_field(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_control())
        .collect::<String>()
        .trim()
        .to_string()
}

/// Reads the configured API key. A blank stored value reads as `None`.
///
/// # Errors
///
/// Returns an error if the option store fails.
pub async fn load_api_key(store: &dyn OptionStore) -> Result<Option<String>, AppError> {
    Ok(store
        .get_option(API_KEY_OPTION)
        .await?
        .filter(|v| !v.trim().is_empty()))
}

/// Sanitizes and stores the API key, returning the stored value.
///
/// # Errors
///
/// Returns an error if the option store fails.
pub async fn save_api_key(store: &dyn OptionStore, raw: &str) -> Result<String, AppError> {
    let key = sanitize_text_field(raw);
    store.update_option(API_KEY_OPTION, &key).await?;
    info!(cleared = key.is_empty(), "API key option updated");
    Ok(key)
}

// ============================================================================
// SSM Parameter Store
// ============================================================================

pub struct SsmOptionStore {
    client: SsmClient,
    prefix: String,
}

fn param_name(prefix: &str, option: &str) -> String {
    let mut p = prefix.to_string();
    if !p.ends_with('/') {
        p.push('/');
    }
    format!("{p}{option}")
}

impl SsmOptionStore {
    #[must_use]
    pub fn new(client: SsmClient, prefix: impl Into<String>) -> Self {
        Self {
            client,
            prefix: prefix.into(),
        }
    }

    /// Builds a client from the ambient AWS environment.
    pub async fn from_env(config: &AppConfig) -> Self {
        let shared = aws_config::from_env().load().await;
        Self::new(SsmClient::new(&shared), config.option_param_prefix.clone())
    }
}

#[async_trait]
impl OptionStore for SsmOptionStore {
    async fn get_option(&self, name: &str) -> Result<Option<String>, AppError> {
        let param = param_name(&self.prefix, name);

        match self
            .client
            .get_parameter()
            .name(&param)
            .with_decryption(true)
            .send()
            .await
        {
            Ok(resp) => Ok(resp
                .parameter
                .and_then(|p| p.value().map(str::to_string))
                .filter(|v| !v.is_empty())),
            Err(e) => {
                if e.as_service_error()
                    .is_some_and(|se| se.is_parameter_not_found())
                {
                    debug!(param = %param, "Option not set");
                    Ok(None)
                } else {
                    Err(AppError::AwsError(format!("ssm get_parameter: {e}")))
                }
            }
        }
    }

    async fn update_option(&self, name: &str, value: &str) -> Result<(), AppError> {
        let param = param_name(&self.prefix, name);

        // SSM rejects empty values, so clearing an option deletes it.
        if value.is_empty() {
            return match self.client.delete_parameter().name(&param).send().await {
                Ok(_) => Ok(()),
                Err(e)
                    if e.as_service_error()
                        .is_some_and(|se| se.is_parameter_not_found()) =>
                {
                    Ok(())
                }
                Err(e) => Err(AppError::AwsError(format!("ssm delete_parameter: {e}"))),
            };
        }

        self.client
            .put_parameter()
            .name(param)
            .value(value)
            .r#type(ParameterType::SecureString)
            .overwrite(true)
            .send()
            .await
            .map_err(|e| AppError::AwsError(format!("ssm put_parameter: {e}")))?;

        Ok(())
    }
}

// ============================================================================
// In-memory store
// ============================================================================

#[derive(Default)]
pub struct MemoryOptionStore {
    options: RwLock<HashMap<String, String>>,
}

impl MemoryOptionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_option(name: &str, value: &str) -> Self {
        let mut options = HashMap::new();
        options.insert(name.to_string(), value.to_string());
        Self {
            options: RwLock::new(options),
        }
    }
}

#[async_trait]
impl OptionStore for MemoryOptionStore {
    async fn get_option(&self, name: &str) -> Result<Option<String>, AppError> {
        Ok(self.options.read().await.get(name).cloned())
    }

    async fn update_option(&self, name: &str, value: &str) -> Result<(), AppError> {
        let mut options = self.options.write().await;
        if value.is_empty() {
            options.remove(name);
        } else {
            options.insert(name.to_string(), value.to_string());
        }
        Ok(())
    }
}
