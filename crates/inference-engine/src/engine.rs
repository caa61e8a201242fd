//! Inference Engine Implementation

use crate::artifact::ModelArtifact;
use crate::InferenceError;
use feature_engine::{FeatureDeriver, RawSample};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, error, info};

/// Minimum positive-class probability required to call a sample potable.
///
/// Deliberately stricter than the classifier's natural 0.5 boundary: a false
/// "potable" is the costly mistake, so borderline samples are reported unsafe.
pub const SAFETY_THRESHOLD: f64 = 0.65;

/// Potability class
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Potability {
    /// Unsafe for consumption
    NotPotable,
    /// Safe for consumption
    Potable,
}

impl Potability {
    /// Classify a positive-class probability against a threshold
    pub fn from_probability(probability: f64, threshold: f64) -> Self {
        if probability >= threshold {
            Potability::Potable
        } else {
            Potability::NotPotable
        }
    }

    /// Numeric label (1 = potable)
    pub fn label(&self) -> u8 {
        match self {
            Potability::NotPotable => 0,
            Potability::Potable => 1,
        }
    }

    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Potability::NotPotable => "NOT POTABLE",
            Potability::Potable => "POTABLE",
        }
    }

    /// Human-readable verdict
    pub fn message(&self) -> String {
        format!("Water is {}", self.as_str())
    }
}

/// Thresholded prediction for one sample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PotabilityPrediction {
    /// 1 when potable, 0 otherwise
    pub prediction: u8,
    /// Same verdict as a boolean
    pub potable: bool,
    /// Positive-class probability (0.0 to 1.0)
    pub confidence: f64,
    /// Threshold the confidence was compared against
    pub threshold: f64,
    /// Human-readable verdict
    pub message: String,
}

impl PotabilityPrediction {
    /// Build a prediction from a positive-class probability
    pub fn from_probability(confidence: f64, threshold: f64) -> Self {
        let class = Potability::from_probability(confidence, threshold);
        Self {
            prediction: class.label(),
            potable: class == Potability::Potable,
            confidence,
            threshold,
            message: class.message(),
        }
    }

    /// Class of this prediction
    pub fn class(&self) -> Potability {
        if self.potable {
            Potability::Potable
        } else {
            Potability::NotPotable
        }
    }
}

/// Result of inference operation
#[derive(Debug, Clone)]
pub struct InferenceResult {
    /// The prediction
    pub prediction: PotabilityPrediction,
    /// Time spent deriving, scaling and classifying
    pub latency: Duration,
}

/// Whether the engine can serve predictions
#[derive(Debug, Clone)]
pub enum EngineState {
    /// Artifacts loaded and validated
    Ready(Arc<ModelArtifact>),
    /// Artifacts failed to load; every request fails fast
    Unavailable { reason: String },
}

/// Potability inference engine
#[derive(Debug, Clone)]
pub struct InferenceEngine {
    state: EngineState,
    deriver: FeatureDeriver,
}

impl InferenceEngine {
    /// Load artifacts from disk. A failure is logged and yields an
    /// `Unavailable` engine instead of an error, so the process keeps serving.
    pub fn load(model_path: impl AsRef<Path>, scaler_path: impl AsRef<Path>) -> Self {
        match ModelArtifact::load(model_path, scaler_path) {
            Ok(artifact) => Self::from_artifact(artifact),
            Err(e) => {
                error!("Critical error loading model: {}", e);
                Self::unavailable(e.to_string())
            }
        }
    }

    /// Create a ready engine around an artifact
    pub fn from_artifact(artifact: ModelArtifact) -> Self {
        info!("Inference engine ready ({})", artifact.classifier().describe());
        Self {
            state: EngineState::Ready(Arc::new(artifact)),
            deriver: FeatureDeriver::new(),
        }
    }

    /// Create an engine that rejects every request
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            state: EngineState::Unavailable {
                reason: reason.into(),
            },
            deriver: FeatureDeriver::new(),
        }
    }

    /// Run inference on a validated sample
    pub fn predict(&self, sample: &RawSample) -> Result<InferenceResult, InferenceError> {
        let artifact = match &self.state {
            EngineState::Ready(artifact) => artifact,
            EngineState::Unavailable { reason } => {
                return Err(InferenceError::ModelUnavailable(reason.clone()));
            }
        };

        let start = Instant::now();
        let features = self.deriver.feature_vector(sample);
        let confidence = artifact.predict_proba(&features)?;

        if !(0.0..=1.0).contains(&confidence) {
            return Err(InferenceError::InferenceFailed(format!(
                "classifier returned probability {} outside [0, 1]",
                confidence
            )));
        }

        let prediction = PotabilityPrediction::from_probability(confidence, SAFETY_THRESHOLD);
        let latency = start.elapsed();
        debug!(
            "Prediction: {} (conf={:.4}, latency={}us)",
            prediction.message,
            confidence,
            latency.as_micros()
        );

        Ok(InferenceResult {
            prediction,
            latency,
        })
    }

    /// Check if the engine can serve predictions
    pub fn is_ready(&self) -> bool {
        matches!(self.state, EngineState::Ready(_))
    }

    /// Current state
    pub fn state(&self) -> &EngineState {
        &self.state
    }

    /// Loaded artifact, if any
    pub fn artifact(&self) -> Option<&ModelArtifact> {
        match &self.state {
            EngineState::Ready(artifact) => Some(artifact.as_ref()),
            EngineState::Unavailable { .. } => None,
        }
    }
}
