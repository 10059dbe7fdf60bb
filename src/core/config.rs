use std::env;

use crate::errors::AppError;

pub const DEFAULT_OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_OPTION_PARAM_PREFIX: &str = "/content-improver/options/";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub openai_api_url: String,
    pub option_param_prefix: String,
    /// Shared secret required to change settings; unset disables the action.
    pub admin_token: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            openai_api_url: DEFAULT_OPENAI_API_URL.to_string(),
            option_param_prefix: DEFAULT_OPTION_PARAM_PREFIX.to_string(),
            admin_token: None,
        }
    }
}

impl AppConfig {
    /// All variables are optional; blank values fall back to the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if `OPENAI_API_URL` is set but is not an http(s) URL.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the config from any variable source, e.g. a map in tests.
    ///
    /// # Errors
    ///
    /// Returns an error if `OPENAI_API_URL` is set but is not an http(s) URL.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let openai_api_url =
            var("OPENAI_API_URL").unwrap_or_else(|| DEFAULT_OPENAI_API_URL.to_string());

        if !(openai_api_url.starts_with("https://") || openai_api_url.starts_with("http://")) {
            return Err(AppError::ConfigError(format!(
                "OPENAI_API_URL: not an http(s) URL: {openai_api_url}"
            )));
        }

        Ok(Self {
            openai_api_url,
            option_param_prefix: var("OPTION_PARAM_PREFIX")
                .unwrap_or_else(|| DEFAULT_OPTION_PARAM_PREFIX.to_string()),
            admin_token: var("ADMIN_TOKEN"),
        })
    }

    /// Whether `candidate` matches the configured admin token.
    #[must_use]
    pub fn is_admin(&self, candidate: Option<&str>) -> bool {
        match (self.admin_token.as_deref(), candidate) {
            (Some(expected), Some(given)) => {
                expected.len() == given.len()
                    && expected
                        .bytes()
                        .zip(given.bytes())
                        .fold(0u8, |acc, (a, b)| acc | (a ^ b))
                        == 0
            }
            _ => false,
        }
    }
}
