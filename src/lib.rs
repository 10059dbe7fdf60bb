//! Content Improver - suggests an improved version of a post using ChatGPT.
//!
//! An editor presses a button in the post editor; the current body is posted
//! to a Lambda-hosted proxy, which asks the OpenAI chat-completions API to
//! improve it and returns the suggestion for insertion below the original.
//!
//! # Architecture
//!
//! The system uses:
//! - AWS Lambda for the proxy endpoint (`action`-routed form POSTs)
//! - SSM Parameter Store for the configured API key
//! - reqwest and openai-api-rs for the ChatGPT call
//! - Tokio for async runtime
//!
//! # Example
//!
//! ```no_run
//! use content_improver::ai::OpenAiClient;
//! use content_improver::core::models::{ImprovementRequest, ImprovementResponse};
//! use content_improver::features::ContentImprover;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     content_improver::setup_logging();
//!
//!     let improver = ContentImprover::new(OpenAiClient::with_default_url()?);
//!     let request = ImprovementRequest::new("The cat sat.", "sk-...");
//!
//!     match improver.improve(&request).await {
//!         ImprovementResponse::Improved { improved_text } => println!("{improved_text}"),
//!         ImprovementResponse::Failed { message } => eprintln!("{message}"),
//!     }
//!
//!     Ok(())
//! }
//! ```

// Module declarations
pub mod ai;
pub mod api;
pub mod core;
pub mod editor;
pub mod errors;
pub mod features;

pub use errors::{AppError, ImprovementError};

/// Configure structured logging with JSON format for AWS Lambda environments.
///
/// This function sets up tracing-subscriber with a JSON formatter suitable for
/// `CloudWatch` Logs integration. Calling it more than once is harmless.
///
/// # Example
///
/// ```
/// content_improver::setup_logging();
/// ```
pub fn setup_logging() {
    use tracing_subscriber::prelude::*;
    let fmt_layer = tracing_subscriber::fmt::layer().json().with_target(true);

    let _ = tracing_subscriber::registry().with(fmt_layer).try_init();
}
