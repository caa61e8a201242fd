//! Feature Vector Assembly

use crate::fields::{BaseField, BASE_FIELD_COUNT, FEATURE_DIMENSION, FEATURE_NAMES};
use crate::FeatureError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::trace;

/// Ordered model input, one value per entry of [`FEATURE_NAMES`]
pub type FeatureVector = [f64; FEATURE_DIMENSION];

/// The nine raw measurements of a water sample
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RawSample {
    pub ph: f64,
    pub hardness: f64,
    pub solids: f64,
    pub chloramines: f64,
    pub sulfate: f64,
    pub conductivity: f64,
    pub organic_carbon: f64,
    pub trihalomethanes: f64,
    pub turbidity: f64,
}

impl RawSample {
    /// Build a sample from values in training order
    pub fn from_array(values: [f64; BASE_FIELD_COUNT]) -> Self {
        Self {
            ph: values[0],
            hardness: values[1],
            solids: values[2],
            chloramines: values[3],
            sulfate: values[4],
            conductivity: values[5],
            organic_carbon: values[6],
            trihalomethanes: values[7],
            turbidity: values[8],
        }
    }

    /// Build a sample from a mapping keyed by lower-case field name.
    ///
    /// Every missing field is reported at once, before any value is read.
    pub fn from_map(values: &HashMap<String, f64>) -> Result<Self, FeatureError> {
        let missing: Vec<BaseField> = BaseField::ALL
            .iter()
            .copied()
            .filter(|field| !values.contains_key(field.as_str()))
            .collect();

        if !missing.is_empty() {
            return Err(FeatureError::MissingFields(missing));
        }

        let mut array = [0.0; BASE_FIELD_COUNT];
        for field in BaseField::ALL {
            array[field.index()] = values[field.as_str()];
        }
        Ok(Self::from_array(array))
    }

    /// Values in training order
    pub fn to_array(&self) -> [f64; BASE_FIELD_COUNT] {
        [
            self.ph,
            self.hardness,
            self.solids,
            self.chloramines,
            self.sulfate,
            self.conductivity,
            self.organic_carbon,
            self.trihalomethanes,
            self.turbidity,
        ]
    }

    /// Value of a single field
    pub fn get(&self, field: BaseField) -> f64 {
        self.to_array()[field.index()]
    }
}

/// Raw sample plus the three engineered features
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivedSample {
    /// Original measurements
    pub raw: RawSample,
    /// chloramines + sulfate + trihalomethanes
    pub total_contaminants: f64,
    /// ph / sulfate, 0.0 when sulfate is zero
    pub ph_ratio: f64,
    /// solids / conductivity, 0.0 when conductivity is zero
    pub stability_index: f64,
}

impl DerivedSample {
    /// Flatten into the model input order
    pub fn to_vector(&self) -> FeatureVector {
        let raw = self.raw.to_array();
        let mut values = [0.0; FEATURE_DIMENSION];
        values[..BASE_FIELD_COUNT].copy_from_slice(&raw);
        values[9] = self.total_contaminants;
        values[10] = self.ph_ratio;
        values[11] = self.stability_index;
        values
    }

    /// Look up a feature by its training column name
    pub fn feature(&self, name: &str) -> Option<f64> {
        FEATURE_NAMES
            .iter()
            .position(|n| *n == name)
            .map(|idx| self.to_vector()[idx])
    }
}

/// Computes the engineered features used at training time
#[derive(Debug, Clone, Copy, Default)]
pub struct FeatureDeriver;

impl FeatureDeriver {
    /// Create a new deriver
    pub fn new() -> Self {
        Self
    }

    /// Derive the engineered features. Never fails: zero denominators yield 0.0.
    pub fn derive(&self, raw: &RawSample) -> DerivedSample {
        let total_contaminants = raw.chloramines + raw.sulfate + raw.trihalomethanes;
        let ph_ratio = ratio_or_zero(raw.ph, raw.sulfate);
        let stability_index = ratio_or_zero(raw.solids, raw.conductivity);

        trace!(
            "Derived features: total_contaminants={}, ph_ratio={}, stability_index={}",
            total_contaminants,
            ph_ratio,
            stability_index
        );

        DerivedSample {
            raw: *raw,
            total_contaminants,
            ph_ratio,
            stability_index,
        }
    }

    /// Derive features and return the ordered model input
    pub fn feature_vector(&self, raw: &RawSample) -> FeatureVector {
        self.derive(raw).to_vector()
    }
}

fn ratio_or_zero(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn reference_sample() -> RawSample {
        RawSample {
            ph: 7.0,
            hardness: 200.0,
            solids: 20000.0,
            chloramines: 7.0,
            sulfate: 330.0,
            conductivity: 400.0,
            organic_carbon: 10.0,
            trihalomethanes: 70.0,
            turbidity: 4.0,
        }
    }

    #[test]
    fn test_derive_reference_sample() {
        let derived = FeatureDeriver::new().derive(&reference_sample());

        assert!((derived.total_contaminants - 407.0).abs() < 1e-9);
        assert!((derived.ph_ratio - 7.0 / 330.0).abs() < 1e-12);
        assert!((derived.stability_index - 50.0).abs() < 1e-12);
    }

    #[test]
    fn test_vector_follows_training_order() {
        let derived = FeatureDeriver::new().derive(&reference_sample());
        let vector = derived.to_vector();

        assert_eq!(vector.len(), FEATURE_DIMENSION);
        assert_eq!(vector[0], 7.0);
        assert_eq!(vector[4], 330.0);
        assert_eq!(vector[8], 4.0);
        assert_eq!(derived.feature("Total_Contaminants"), Some(vector[9]));
        assert_eq!(derived.feature("pH_Ratio"), Some(vector[10]));
        assert_eq!(derived.feature("Stability_Index"), Some(vector[11]));
        assert_eq!(derived.feature("Nitrate"), None);
    }

    #[test]
    fn test_zero_denominators() {
        let sample = RawSample {
            sulfate: 0.0,
            conductivity: 0.0,
            ..reference_sample()
        };
        let derived = FeatureDeriver::new().derive(&sample);

        assert_eq!(derived.ph_ratio, 0.0);
        assert_eq!(derived.stability_index, 0.0);
        assert!((derived.total_contaminants - 77.0).abs() < 1e-9);
    }

    #[test]
    fn test_negative_zero_denominator() {
        let sample = RawSample {
            sulfate: -0.0,
            ..reference_sample()
        };
        assert_eq!(FeatureDeriver::new().derive(&sample).ph_ratio, 0.0);
    }

    #[test]
    fn test_from_map_reports_all_missing_fields() {
        let mut values = HashMap::new();
        values.insert("ph".to_string(), 7.0);
        values.insert("hardness".to_string(), 200.0);

        let err = RawSample::from_map(&values).unwrap_err();
        let FeatureError::MissingFields(missing) = &err;
        assert_eq!(missing.len(), 7);
        assert_eq!(missing[0], BaseField::Solids);
        assert!(err.to_string().contains("sulfate"));
        assert!(err.to_string().contains("turbidity"));
    }

    #[test]
    fn test_from_map_complete() {
        let values: HashMap<String, f64> = BaseField::ALL
            .iter()
            .map(|f| (f.as_str().to_string(), f.index() as f64))
            .collect();

        let sample = RawSample::from_map(&values).unwrap();
        assert_eq!(sample.to_array(), [0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);
        assert_eq!(sample.get(BaseField::Turbidity), 8.0);
    }

    fn finite() -> impl Strategy<Value = f64> {
        -1.0e6..1.0e6f64
    }

    proptest! {
        #[test]
        fn prop_base_values_pass_through(values in proptest::array::uniform9(finite())) {
            let vector = FeatureDeriver::new().feature_vector(&RawSample::from_array(values));
            prop_assert_eq!(vector.len(), FEATURE_DIMENSION);
            prop_assert_eq!(&vector[..BASE_FIELD_COUNT], &values[..]);
        }

        #[test]
        fn prop_zero_sulfate_zeroes_ph_ratio(values in proptest::array::uniform9(finite())) {
            let mut sample = RawSample::from_array(values);
            sample.sulfate = 0.0;
            prop_assert_eq!(FeatureDeriver::new().derive(&sample).ph_ratio, 0.0);
        }

        #[test]
        fn prop_zero_conductivity_zeroes_stability(values in proptest::array::uniform9(finite())) {
            let mut sample = RawSample::from_array(values);
            sample.conductivity = 0.0;
            prop_assert_eq!(FeatureDeriver::new().derive(&sample).stability_index, 0.0);
        }
    }
}
