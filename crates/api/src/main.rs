//! Water Potability API - Main Entry Point

use anyhow::Context;
use api::{init_logging, init_metrics, run_server, AppState, ServiceConfig};
use inference_engine::InferenceEngine;
use std::sync::Arc;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServiceConfig::load().context("failed to load configuration")?;
    init_logging(&config.log).context("failed to initialize logging")?;

    info!("=== Water Potability API v{} ===", env!("CARGO_PKG_VERSION"));

    let engine = InferenceEngine::load(&config.model.model_path, &config.model.scaler_path);
    if !engine.is_ready() {
        warn!("Serving without a model: every prediction request will return 500");
    }

    let metrics = if config.metrics.enabled {
        Some(init_metrics().context("failed to install metrics recorder")?)
    } else {
        None
    };

    let state = Arc::new(AppState::new(engine, config.validation.clone(), metrics));
    run_server(state, &config).await
}
