//! Potability Inference Engine
//!
//! Loads the persisted scaler and classifier once, then turns raw samples
//! into thresholded potability predictions.

mod artifact;
mod classifier;
mod engine;
mod scaler;

pub use artifact::ModelArtifact;
pub use classifier::{Classifier, DecisionTree, LogisticRegression, RandomForest, TreeNode};
pub use engine::{
    EngineState, InferenceEngine, InferenceResult, Potability, PotabilityPrediction,
    SAFETY_THRESHOLD,
};
pub use scaler::StandardScaler;

use std::path::PathBuf;
use thiserror::Error;

/// Errors during inference
#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("Model unavailable: {0}")]
    ModelUnavailable(String),
    #[error("Inference failed: {0}")]
    InferenceFailed(String),
    #[error("Invalid input shape: expected {expected}, got {actual}")]
    InvalidInputShape { expected: usize, actual: usize },
}

/// Errors while loading or validating model artifacts
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("Artifact file missing: {}", .0.display())]
    Missing(PathBuf),
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Invalid artifact: {0}")]
    Invalid(String),
}
