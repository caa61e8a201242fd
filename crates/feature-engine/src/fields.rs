//! Base Measurement Fields and Feature Ordering

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of raw measurements accepted per sample
pub const BASE_FIELD_COUNT: usize = 9;

/// Number of features in the model input vector (9 raw + 3 engineered)
pub const FEATURE_DIMENSION: usize = 12;

/// Column names in the exact order the model was trained on.
///
/// The scaler and classifier artifacts are indexed by position, so any
/// change here silently breaks every prediction.
pub const FEATURE_NAMES: [&str; FEATURE_DIMENSION] = [
    "ph",
    "Hardness",
    "Solids",
    "Chloramines",
    "Sulfate",
    "Conductivity",
    "Organic_carbon",
    "Trihalomethanes",
    "Turbidity",
    "Total_Contaminants",
    "pH_Ratio",
    "Stability_Index",
];

/// One of the nine raw water-quality measurements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BaseField {
    /// Acidity (0-14)
    Ph,
    /// Calcium and magnesium content (mg/L)
    Hardness,
    /// Total dissolved solids (ppm)
    Solids,
    /// Chloramine concentration (ppm)
    Chloramines,
    /// Sulfate concentration (mg/L)
    Sulfate,
    /// Electrical conductivity (μS/cm)
    Conductivity,
    /// Total organic carbon (ppm)
    OrganicCarbon,
    /// Trihalomethane concentration (μg/L)
    Trihalomethanes,
    /// Turbidity (NTU)
    Turbidity,
}

impl BaseField {
    /// All base fields in training order
    pub const ALL: [BaseField; BASE_FIELD_COUNT] = [
        BaseField::Ph,
        BaseField::Hardness,
        BaseField::Solids,
        BaseField::Chloramines,
        BaseField::Sulfate,
        BaseField::Conductivity,
        BaseField::OrganicCarbon,
        BaseField::Trihalomethanes,
        BaseField::Turbidity,
    ];

    /// Lower-case name accepted on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            BaseField::Ph => "ph",
            BaseField::Hardness => "hardness",
            BaseField::Solids => "solids",
            BaseField::Chloramines => "chloramines",
            BaseField::Sulfate => "sulfate",
            BaseField::Conductivity => "conductivity",
            BaseField::OrganicCarbon => "organic_carbon",
            BaseField::Trihalomethanes => "trihalomethanes",
            BaseField::Turbidity => "turbidity",
        }
    }

    /// Column name used in the training data
    pub fn column_name(&self) -> &'static str {
        FEATURE_NAMES[self.index()]
    }

    /// Position in the feature vector
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Look up a field by its wire name, ignoring ASCII case
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|field| field.as_str().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for BaseField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_fields_prefix_feature_order() {
        for (i, field) in BaseField::ALL.iter().enumerate() {
            assert_eq!(field.index(), i);
            assert!(field.column_name().eq_ignore_ascii_case(field.as_str()));
        }
    }

    #[test]
    fn test_from_name_ignores_case() {
        assert_eq!(BaseField::from_name("PH"), Some(BaseField::Ph));
        assert_eq!(BaseField::from_name("Organic_Carbon"), Some(BaseField::OrganicCarbon));
        assert_eq!(BaseField::from_name("nitrate"), None);
    }
}
