//! Feature Engineering Engine
//!
//! Maps the nine raw water-quality measurements onto the ordered 12-feature
//! vector the potability classifier was trained on.

mod features;
mod fields;

pub use features::{DerivedSample, FeatureDeriver, FeatureVector, RawSample};
pub use fields::{BaseField, BASE_FIELD_COUNT, FEATURE_DIMENSION, FEATURE_NAMES};

use thiserror::Error;

/// Errors during feature derivation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FeatureError {
    #[error("Missing fields: {}", join_fields(.0))]
    MissingFields(Vec<BaseField>),
}

fn join_fields(fields: &[BaseField]) -> String {
    fields
        .iter()
        .map(BaseField::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}
