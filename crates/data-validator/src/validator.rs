//! Sample Validator

use crate::error::ValidationError;
use crate::normalizer::NormalizedInput;
use feature_engine::{BaseField, RawSample};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use tracing::debug;

/// Validation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Accept numbers sent as strings (e.g. `"7.2"`)
    pub accept_numeric_strings: bool,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            accept_numeric_strings: true,
        }
    }
}

impl ValidationConfig {
    /// Only accept JSON numbers
    pub fn strict() -> Self {
        Self {
            accept_numeric_strings: false,
        }
    }
}

/// Validator for incoming water samples
#[derive(Debug, Clone)]
pub struct Validator {
    config: ValidationConfig,
}

impl Validator {
    /// Create a new validator with given config
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Validate a request body and build a complete sample.
    ///
    /// Presence of all nine fields is checked first; conversion errors are
    /// reported for the first offending field in training order.
    pub fn validate(&self, body: &Value) -> Result<RawSample, ValidationError> {
        let input = NormalizedInput::from_value(body)?;
        self.validate_normalized(&input)
    }

    /// Validate an already normalized input
    pub fn validate_normalized(&self, input: &NormalizedInput) -> Result<RawSample, ValidationError> {
        self.check_presence(input)?;

        let mut values = HashMap::with_capacity(BaseField::ALL.len());
        for field in BaseField::ALL {
            // presence was checked above
            if let Some(value) = input.get(field.as_str()) {
                values.insert(field.as_str().to_string(), self.convert(field, value)?);
            }
        }

        let sample = RawSample::from_map(&values)?;
        debug!("Validated sample: {:?}", sample);
        Ok(sample)
    }

    /// Check that every base field is present
    pub fn check_presence(&self, input: &NormalizedInput) -> Result<(), ValidationError> {
        let missing: Vec<BaseField> = BaseField::ALL
            .iter()
            .copied()
            .filter(|field| !input.contains(field.as_str()))
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::MissingFields(missing))
        }
    }

    /// Convert a single JSON value into a finite float
    pub fn convert(&self, field: BaseField, value: &Value) -> Result<f64, ValidationError> {
        let number = match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) if self.config.accept_numeric_strings => s.trim().parse::<f64>().ok(),
            _ => None,
        }
        .ok_or(ValidationError::NotNumeric { field })?;

        if number.is_finite() {
            Ok(number)
        } else {
            Err(ValidationError::NonFinite { field })
        }
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new(ValidationConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::{json, Map};

    fn valid_body() -> Value {
        json!({
            "ph": 7.0,
            "hardness": 200,
            "solids": 20000,
            "chloramines": 7,
            "sulfate": 330,
            "conductivity": 400,
            "organic_carbon": 10,
            "trihalomethanes": 70,
            "turbidity": 4
        })
    }

    #[test]
    fn test_valid_sample() {
        let sample = Validator::default().validate(&valid_body()).unwrap();
        assert_eq!(sample.ph, 7.0);
        assert_eq!(sample.solids, 20000.0);
        assert_eq!(sample.turbidity, 4.0);
    }

    #[test]
    fn test_mixed_case_names() {
        let body = json!({
            "PH": 7.0, "Hardness": 200, "SOLIDS": 20000, "Chloramines": 7,
            "Sulfate": 330, "Conductivity": 400, "Organic_carbon": 10,
            "Trihalomethanes": 70, "Turbidity": 4
        });
        let sample = Validator::default().validate(&body).unwrap();
        assert_eq!(sample.sulfate, 330.0);
        assert_eq!(sample.organic_carbon, 10.0);
    }

    #[test]
    fn test_missing_field_is_named() {
        let mut body = valid_body();
        body.as_object_mut().unwrap().remove("sulfate");

        let err = Validator::default().validate(&body).unwrap_err();
        assert_eq!(err, ValidationError::MissingFields(vec![BaseField::Sulfate]));
        assert_eq!(err.to_string(), "Missing fields: sulfate");
        assert_eq!(err.field(), Some(BaseField::Sulfate));
    }

    #[test]
    fn test_missing_checked_before_conversion() {
        let mut body = valid_body();
        let object = body.as_object_mut().unwrap();
        object.remove("turbidity");
        object.insert("ph".into(), json!("acidic"));

        let err = Validator::default().validate(&body).unwrap_err();
        assert!(matches!(err, ValidationError::MissingFields(_)));
    }

    #[test]
    fn test_non_numeric_value() {
        let mut body = valid_body();
        body["hardness"] = json!("very hard");

        let err = Validator::default().validate(&body).unwrap_err();
        assert_eq!(err, ValidationError::NotNumeric { field: BaseField::Hardness });
        assert!(err.to_string().contains("'hardness'"));
    }

    #[test]
    fn test_numeric_strings() {
        let mut body = valid_body();
        body["ph"] = json!(" 6.5 ");

        assert_eq!(Validator::default().validate(&body).unwrap().ph, 6.5);
        assert!(Validator::new(ValidationConfig::strict()).validate(&body).is_err());
    }

    #[test]
    fn test_rejects_bool_null_and_nested() {
        let validator = Validator::default();
        for bad in [json!(true), Value::Null, json!([7.0]), json!({"v": 7.0})] {
            let mut body = valid_body();
            body["ph"] = bad;
            assert_eq!(
                validator.validate(&body).unwrap_err(),
                ValidationError::NotNumeric { field: BaseField::Ph }
            );
        }
    }

    #[test]
    fn test_rejects_non_finite_strings() {
        let mut body = valid_body();
        body["turbidity"] = json!("NaN");

        let err = Validator::default().validate(&body).unwrap_err();
        assert_eq!(err, ValidationError::NonFinite { field: BaseField::Turbidity });
    }

    #[test]
    fn test_extra_fields_ignored() {
        let mut body = valid_body();
        body["nitrate"] = json!(12.0);
        assert!(Validator::default().validate(&body).is_ok());
    }

    proptest! {
        #[test]
        fn prop_any_single_missing_field_is_reported(idx in 0usize..9) {
            let field = BaseField::ALL[idx];
            let mut object: Map<String, Value> = valid_body().as_object().unwrap().clone();
            object.remove(field.as_str());

            let err = Validator::default().validate(&Value::Object(object)).unwrap_err();
            prop_assert_eq!(err.field(), Some(field));
            prop_assert!(err.to_string().contains(field.as_str()));
        }
    }
}
