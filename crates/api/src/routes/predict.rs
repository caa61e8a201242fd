//! Prediction Routes

use axum::{body::Bytes, extract::State, Json};
use inference_engine::{Potability, PotabilityPrediction};
use metrics::{counter, histogram};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

use crate::error::ApiError;
use crate::AppState;

/// Response for predict endpoint
#[derive(Debug, Serialize, Deserialize)]
pub struct PredictResponse {
    #[serde(flatten)]
    pub result: PotabilityPrediction,
    /// Request body exactly as received
    pub input: Value,
}

/// Classify one water sample
pub async fn predict(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<PredictResponse>, ApiError> {
    if !state.engine.is_ready() {
        return Err(ApiError::ModelUnavailable);
    }

    let input: Value = serde_json::from_slice(&body)
        .map_err(|e| ApiError::BadRequest(format!("Invalid JSON body: {}", e)))?;

    let sample = state.validator.validate(&input)?;
    let result = state.engine.predict(&sample)?;

    let outcome = match result.prediction.class() {
        Potability::Potable => "potable",
        Potability::NotPotable => "not_potable",
    };
    counter!("potability_predictions_total", "outcome" => outcome).increment(1);
    histogram!("potability_inference_duration_seconds").record(result.latency.as_secs_f64());
    debug!(
        "Served prediction {} with confidence {:.4}",
        outcome, result.prediction.confidence
    );

    Ok(Json(PredictResponse {
        result: result.prediction,
        input,
    }))
}
