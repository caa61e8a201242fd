//! Logging and metrics setup

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use tracing::subscriber::SetGlobalDefaultError;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use crate::config::LogConfig;

/// Initialize logging. `RUST_LOG` overrides the configured level.
pub fn init_logging(config: &LogConfig) -> Result<(), SetGlobalDefaultError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.level));

    let builder = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(true);

    if config.json {
        tracing::subscriber::set_global_default(builder.json().finish())
    } else {
        tracing::subscriber::set_global_default(builder.finish())
    }
}

/// Install the global Prometheus recorder and return a handle for `/metrics`
pub fn init_metrics() -> Result<PrometheusHandle, BuildError> {
    let handle = PrometheusBuilder::new().install_recorder()?;
    describe_metrics();
    Ok(handle)
}

fn describe_metrics() {
    metrics::describe_counter!(
        "potability_predictions_total",
        "Predictions served, labelled by outcome"
    );
    metrics::describe_counter!(
        "potability_request_errors_total",
        "Failed prediction requests, labelled by error kind"
    );
    metrics::describe_histogram!(
        "potability_inference_duration_seconds",
        metrics::Unit::Seconds,
        "Time spent deriving, scaling and classifying one sample"
    );
}
