//! The "Improve Content" button: read, post to the proxy, insert or report.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use reqwest::Client;
use tracing::{info, warn};

use super::surfaces::{EditorSurface, select_surface};
use crate::api::handler::IMPROVE_ACTION;
use crate::core::models::ImprovementResponse;
use crate::core::options::{OptionStore, load_api_key};
use crate::errors::AppError;

pub const NO_CONTENT_MESSAGE: &str = "No content found in the editor.";
pub const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong.";
pub const ERROR_PREFIX: &str = "<strong>Error:</strong><br>";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    /// The suggestion was added to the named surface.
    Inserted { surface: &'static str },
    /// Nothing to send; no request was made.
    NoContent,
    /// The proxy reported an error or could not be reached.
    Failed { message: String },
}

/// Shared view of the button's "request in flight" state.
///
/// Clones observe the same flag, so the page can grey out the button while
/// `on_click` is awaiting the proxy.
#[derive(Debug, Clone, Default)]
pub struct BusyIndicator(Arc<AtomicBool>);

impl BusyIndicator {
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    fn engage(&self) -> BusyGuard {
        self.0.store(true, Ordering::SeqCst);
        BusyGuard(self.clone())
    }
}

/// Clears the flag when the request finishes or the click future is dropped.
struct BusyGuard(BusyIndicator);

impl Drop for BusyGuard {
    fn drop(&mut self) {
        (self.0).0.store(false, Ordering::SeqCst);
    }
}

pub struct EditorIntegration {
    http: Client,
    proxy_url: String,
    api_key: String,
    status: String,
    busy: BusyIndicator,
}

impl EditorIntegration {
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(proxy_url: impl Into<String>, api_key: impl Into<String>) -> Result<Self, AppError> {
        let http = Client::builder()
            .build()
            .map_err(|e| AppError::HttpError(format!("Failed to build proxy HTTP client: {e}")))?;

        Ok(Self {
            http,
            proxy_url: proxy_url.into(),
            api_key: api_key.into(),
            status: String::new(),
            busy: BusyIndicator::default(),
        })
    }

    /// Uses the API key configured on the settings surface. An unset key is
    /// sent as empty and rejected by the proxy.
    ///
    /// # Errors
    ///
    /// Returns an error if the option store or the HTTP client fails.
    pub async fn from_settings(
        proxy_url: impl Into<String>,
        store: &dyn OptionStore,
    ) -> Result<Self, AppError> {
        let api_key = load_api_key(store).await?.unwrap_or_default();
        Self::new(proxy_url, api_key)
    }

    /// Contents of the status area below the button.
    #[must_use]
    pub fn status(&self) -> &str {
        &self.status
    }

    /// Whether the button is waiting on a response.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.busy.is_busy()
    }

    /// Handle that stays readable while `on_click` holds `&mut self`.
    #[must_use]
    pub fn busy_indicator(&self) -> BusyIndicator {
        self.busy.clone()
    }

    /// Handles one button press against the editor surfaces on screen.
    pub async fn on_click(&mut self, surfaces: &mut [&mut dyn EditorSurface]) -> ClickOutcome {
        let selected = select_surface(surfaces)
            .and_then(|idx| surfaces[idx].content().map(|content| (idx, content)));

        let Some((idx, content)) = selected else {
            self.status = NO_CONTENT_MESSAGE.to_string();
            return ClickOutcome::NoContent;
        };

        let surface = surfaces[idx].name();
        info!(surface = surface, "Sending editor content for improvement");

        let result = {
            let _busy = self.busy.engage();
            self.request_improvement(&content).await
        };

        match result {
            Ok(ImprovementResponse::Improved { improved_text }) => {
                surfaces[idx].insert_improvement(&improved_text);
                self.status.clear();
                ClickOutcome::Inserted { surface }
            }
            Ok(ImprovementResponse::Failed { message }) => self.fail(message),
            Err(e) => {
                warn!("Improvement request failed: {}", e);
                self.fail(GENERIC_FAILURE_MESSAGE.to_string())
            }
        }
    }

    fn fail(&mut self, message: String) -> ClickOutcome {
        self.status = format!("{ERROR_PREFIX}{message}");
        ClickOutcome::Failed { message }
    }

    async fn request_improvement(&self, content: &str) -> Result<ImprovementResponse, AppError> {
        let response = self
            .http
            .post(&self.proxy_url)
            .form(&[
                ("action", IMPROVE_ACTION),
                ("post_content", content),
                ("api_key", self.api_key.as_str()),
            ])
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json::<ImprovementResponse>().await?)
    }
}
