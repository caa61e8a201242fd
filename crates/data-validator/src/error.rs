//! Validation Error Types

use feature_engine::{BaseField, FeatureError};
use thiserror::Error;

/// Errors during request validation. Every variant is the caller's fault.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Body is not a flat JSON object
    #[error("Invalid data format: {0}")]
    InvalidFormat(String),

    /// One or more required fields are absent
    #[error("Missing fields: {}", join_fields(.0))]
    MissingFields(Vec<BaseField>),

    /// Value cannot be converted to a number
    #[error("Invalid value for field '{field}': expected a number")]
    NotNumeric { field: BaseField },

    /// Value is NaN or infinite
    #[error("Invalid value for field '{field}': must be a finite number")]
    NonFinite { field: BaseField },
}

impl ValidationError {
    /// Field named by the error, if it concerns a single field
    pub fn field(&self) -> Option<BaseField> {
        match self {
            ValidationError::NotNumeric { field } | ValidationError::NonFinite { field } => {
                Some(*field)
            }
            ValidationError::MissingFields(fields) if fields.len() == 1 => Some(fields[0]),
            _ => None,
        }
    }
}

impl From<FeatureError> for ValidationError {
    fn from(err: FeatureError) -> Self {
        match err {
            FeatureError::MissingFields(fields) => ValidationError::MissingFields(fields),
        }
    }
}

fn join_fields(fields: &[BaseField]) -> String {
    fields
        .iter()
        .map(BaseField::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}
