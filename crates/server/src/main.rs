//! Obesity prediction service
//!
//! Loads the trained pipeline artifact once at startup and serves
//! predictions over HTTP. The pipeline is immutable shared state for the
//! lifetime of the process; retraining requires a restart.

use std::sync::Arc;

use anyhow::{Context, Result};
use obesity_core::ObesityPipeline;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod api;
mod config;
mod metrics;

const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing with JSON output and env filter
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt::layer().json())
        .init();

    info!(version = SERVER_VERSION, "Starting obesity-server");

    // Load configuration
    let server_config = config::ServerConfig::load()?;

    // The artifact is read exactly once; every request shares this pipeline.
    let pipeline = ObesityPipeline::load(&server_config.model_path)
        .with_context(|| format!("Failed to load pipeline from {}", server_config.model_path))?;
    info!(
        model_path = %server_config.model_path,
        params = %pipeline.metadata.params,
        test_accuracy = pipeline.metadata.test_accuracy,
        "Pipeline loaded"
    );

    // Initialize metrics
    let server_metrics = metrics::ServerMetrics::new();
    server_metrics.set_pipeline_info(&pipeline.metadata.params.to_string());

    // Create shared application state
    let state = Arc::new(api::AppState::new(Arc::new(pipeline), server_metrics));

    api::serve(server_config.port, state).await
}
