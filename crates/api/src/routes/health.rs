//! Health Routes

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::AppState;

/// Health response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always "ok" while the process is serving
    pub status: String,
    pub message: String,
    /// Whether predictions can be served
    pub model_loaded: bool,
    pub timestamp: u64,
    pub version: String,
    pub uptime_seconds: u64,
}

/// Liveness check. Reports "ok" even when the model failed to load.
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let timestamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);

    Json(HealthResponse {
        status: "ok".to_string(),
        message: "Potability API is running".to_string(),
        model_loaded: state.engine.is_ready(),
        timestamp,
        version: state.version.clone(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
    })
}
