//! Case-Insensitive Field Normalization

use crate::error::ValidationError;
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Request fields keyed by lower-case name.
///
/// Built as a fresh mapping; the caller's object is never modified, so the
/// original body can still be echoed back verbatim.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedInput {
    fields: HashMap<String, Value>,
}

impl NormalizedInput {
    /// Normalize a JSON object. When two keys differ only by case the one
    /// appearing later in the body wins.
    pub fn from_object(object: &Map<String, Value>) -> Self {
        let fields = object
            .iter()
            .map(|(key, value)| (key.to_lowercase(), value.clone()))
            .collect();
        Self { fields }
    }

    /// Normalize any JSON value, rejecting everything but a flat object
    pub fn from_value(value: &Value) -> Result<Self, ValidationError> {
        match value {
            Value::Object(object) => Ok(Self::from_object(object)),
            other => Err(ValidationError::InvalidFormat(format!(
                "expected a JSON object, got {}",
                json_type_name(other)
            ))),
        }
    }

    /// Look up a field by lower-case name
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Whether a lower-case name is present
    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Number of distinct normalized fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether no fields were supplied
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
