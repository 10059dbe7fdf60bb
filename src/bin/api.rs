use std::sync::Arc;

use content_improver::ai::OpenAiClient;
use content_improver::api::{ApiState, handler};
use content_improver::core::config::AppConfig;
use lambda_runtime::{Error, run, service_fn};
use tracing::error;

#[tokio::main]
async fn main() -> Result<(), Error> {
    content_improver::setup_logging();

    let config = AppConfig::from_env().map_err(|e| {
        error!("Config error: {}", e);
        Error::from(e)
    })?;
    let state = Arc::new(ApiState::<OpenAiClient>::from_config(config).await?);

    run(service_fn(move |event| {
        let state = Arc::clone(&state);
        async move { handler(&*state, event).await }
    }))
    .await
}
