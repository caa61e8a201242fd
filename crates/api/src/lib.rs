//! Water Potability API Server
//!
//! HTTP surface for the potability classifier: liveness, prediction and
//! Prometheus metrics.

use anyhow::Context;
use axum::{
    routing::{get, post},
    Router,
};
use data_validator::{ValidationConfig, Validator};
use inference_engine::InferenceEngine;
use metrics_exporter_prometheus::PrometheusHandle;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use tower::ServiceBuilder;
use tower_governor::GovernorLayer;
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, trace::TraceLayer};
use tracing::info;

pub mod config;
pub mod error;
pub mod rate_limit;
pub mod routes;
pub mod telemetry;

pub use config::ServiceConfig;
pub use error::ApiError;
pub use telemetry::{init_logging, init_metrics};

use rate_limit::{create_governor_config, RateLimitConfig};

/// Application state shared across handlers.
///
/// Built once at startup and never mutated afterwards.
pub struct AppState {
    /// Loaded (or unavailable) model
    pub engine: InferenceEngine,
    /// Request validator
    pub validator: Validator,
    /// Prometheus handle, when the exporter is enabled
    pub metrics: Option<PrometheusHandle>,
    /// Version string
    pub version: String,
    /// Start time
    pub start_time: Instant,
}

impl AppState {
    /// Create new application state
    pub fn new(
        engine: InferenceEngine,
        validation: ValidationConfig,
        metrics: Option<PrometheusHandle>,
    ) -> Self {
        Self {
            engine,
            validator: Validator::new(validation),
            metrics,
            version: env!("CARGO_PKG_VERSION").to_string(),
            start_time: Instant::now(),
        }
    }
}

/// Create the application router.
///
/// With a rate limit config the prediction routes are limited per peer IP,
/// which requires serving with `ConnectInfo<SocketAddr>`.
pub fn create_router(state: Arc<AppState>, rate_limit: Option<&RateLimitConfig>) -> Router {
    let mut predict_routes = Router::new()
        .route("/api/predict", post(routes::predict::predict))
        .route("/predict", post(routes::predict::predict));

    if let Some(limits) = rate_limit {
        if let Some(governor) = create_governor_config(limits) {
            info!(
                "Rate limiting predictions: burst={}, replenish every {}s",
                limits.burst_size, limits.per_second
            );
            predict_routes = predict_routes.layer(GovernorLayer { config: governor });
        }
    }

    Router::new()
        .route("/api/data", get(routes::health::health))
        .route("/health", get(routes::health::health))
        .route("/metrics", get(routes::metrics::render))
        .merge(predict_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive())
                .layer(CatchPanicLayer::custom(error::handle_panic)),
        )
        .with_state(state)
}

/// Run the server until it is shut down
pub async fn run_server(state: Arc<AppState>, config: &ServiceConfig) -> anyhow::Result<()> {
    let app = create_router(state, Some(&config.rate_limit));
    let addr = config.server.bind_addr();

    info!("Starting API server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .context("server error")?;

    Ok(())
}
