//! Binary Classifiers

use crate::{ArtifactError, InferenceError};
use feature_engine::FEATURE_DIMENSION;
use serde::{Deserialize, Serialize};

/// Trained potability classifier, tagged by `kind` on disk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Classifier {
    LogisticRegression(LogisticRegression),
    RandomForest(RandomForest),
}

impl Classifier {
    /// Probability of the positive (potable) class for one scaled vector
    pub fn predict_proba(&self, features: &[f64]) -> Result<f64, InferenceError> {
        if features.len() != FEATURE_DIMENSION {
            return Err(InferenceError::InvalidInputShape {
                expected: FEATURE_DIMENSION,
                actual: features.len(),
            });
        }

        match self {
            Classifier::LogisticRegression(model) => Ok(model.predict_proba(features)),
            Classifier::RandomForest(model) => model.predict_proba(features),
        }
    }

    /// Check structural consistency after deserialization
    pub fn validate(&self) -> Result<(), ArtifactError> {
        match self {
            Classifier::LogisticRegression(model) => model.validate(),
            Classifier::RandomForest(model) => model.validate(),
        }
    }

    /// Short description for logs
    pub fn describe(&self) -> String {
        match self {
            Classifier::LogisticRegression(_) => "logistic_regression".to_string(),
            Classifier::RandomForest(forest) => {
                format!("random_forest({} trees)", forest.trees.len())
            }
        }
    }
}

/// Logistic regression: `sigmoid(w · x + b)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticRegression {
    pub coefficients: Vec<f64>,
    pub intercept: f64,
}

impl LogisticRegression {
    fn predict_proba(&self, features: &[f64]) -> f64 {
        let z = self
            .coefficients
            .iter()
            .zip(features)
            .map(|(w, x)| w * x)
            .sum::<f64>()
            + self.intercept;
        sigmoid(z)
    }

    fn validate(&self) -> Result<(), ArtifactError> {
        if self.coefficients.len() != FEATURE_DIMENSION {
            return Err(ArtifactError::Invalid(format!(
                "logistic regression expects {} coefficients, got {}",
                FEATURE_DIMENSION,
                self.coefficients.len()
            )));
        }
        if !self.intercept.is_finite() || self.coefficients.iter().any(|w| !w.is_finite()) {
            return Err(ArtifactError::Invalid(
                "logistic regression contains a non-finite weight".to_string(),
            ));
        }
        Ok(())
    }
}

/// Numerically stable logistic function
fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

/// A tree node. Split nodes send `x[feature] <= threshold` to `left`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TreeNode {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        /// Class weights `[not_potable, potable]`
        value: [f64; 2],
    },
}

/// Decision tree stored as a preorder node array, root at index 0
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTree {
    pub nodes: Vec<TreeNode>,
}

impl DecisionTree {
    fn predict_proba(&self, features: &[f64]) -> Result<f64, InferenceError> {
        let mut idx = 0;
        // children always point forward, so a path is at most nodes.len() long
        for _ in 0..self.nodes.len() {
            match self.nodes.get(idx) {
                Some(TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                }) => {
                    idx = if features[*feature] <= *threshold {
                        *left
                    } else {
                        *right
                    };
                }
                Some(TreeNode::Leaf { value }) => return Ok(value[1] / (value[0] + value[1])),
                None => break,
            }
        }
        Err(InferenceError::InferenceFailed(format!(
            "tree traversal left the node array at index {}",
            idx
        )))
    }

    fn validate(&self) -> Result<(), ArtifactError> {
        if self.nodes.is_empty() {
            return Err(ArtifactError::Invalid("decision tree has no nodes".to_string()));
        }

        for (idx, node) in self.nodes.iter().enumerate() {
            match node {
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    if *feature >= FEATURE_DIMENSION {
                        return Err(ArtifactError::Invalid(format!(
                            "node {} splits on feature {} (max {})",
                            idx,
                            feature,
                            FEATURE_DIMENSION - 1
                        )));
                    }
                    if !threshold.is_finite() {
                        return Err(ArtifactError::Invalid(format!(
                            "node {} has a non-finite threshold",
                            idx
                        )));
                    }
                    for child in [*left, *right] {
                        if child <= idx || child >= self.nodes.len() {
                            return Err(ArtifactError::Invalid(format!(
                                "node {} has invalid child index {}",
                                idx, child
                            )));
                        }
                    }
                }
                TreeNode::Leaf { value } => {
                    let total = value[0] + value[1];
                    if value.iter().any(|v| !v.is_finite() || *v < 0.0) || total <= 0.0 {
                        return Err(ArtifactError::Invalid(format!(
                            "leaf {} has invalid class weights {:?}",
                            idx, value
                        )));
                    }
                }
            }
        }
        Ok(())
    }
}

/// Random forest: mean of per-tree positive-class probabilities
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomForest {
    pub trees: Vec<DecisionTree>,
}

impl RandomForest {
    fn predict_proba(&self, features: &[f64]) -> Result<f64, InferenceError> {
        let mut sum = 0.0;
        for tree in &self.trees {
            sum += tree.predict_proba(features)?;
        }
        Ok(sum / self.trees.len() as f64)
    }

    fn validate(&self) -> Result<(), ArtifactError> {
        if self.trees.is_empty() {
            return Err(ArtifactError::Invalid("random forest has no trees".to_string()));
        }
        self.trees.iter().try_for_each(DecisionTree::validate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn stump(feature: usize, threshold: f64, left: [f64; 2], right: [f64; 2]) -> DecisionTree {
        DecisionTree {
            nodes: vec![
                TreeNode::Split {
                    feature,
                    threshold,
                    left: 1,
                    right: 2,
                },
                TreeNode::Leaf { value: left },
                TreeNode::Leaf { value: right },
            ],
        }
    }

    #[test]
    fn test_logistic_regression() {
        let model = Classifier::LogisticRegression(LogisticRegression {
            coefficients: vec![0.0; FEATURE_DIMENSION],
            intercept: 0.0,
        });
        let p = model.predict_proba(&[1.0; FEATURE_DIMENSION]).unwrap();
        assert!((p - 0.5).abs() < 1e-12);

        let mut coefficients = vec![0.0; FEATURE_DIMENSION];
        coefficients[0] = 1.0;
        let model = Classifier::LogisticRegression(LogisticRegression {
            coefficients,
            intercept: 0.0,
        });
        let mut x = [0.0; FEATURE_DIMENSION];
        x[0] = 2.0;
        let p = model.predict_proba(&x).unwrap();
        assert!((p - 1.0 / (1.0 + (-2.0f64).exp())).abs() < 1e-12);
    }

    #[test]
    fn test_sigmoid_extremes_stay_in_range() {
        assert_eq!(sigmoid(-1000.0), 0.0);
        assert_eq!(sigmoid(1000.0), 1.0);
        assert!((sigmoid(0.0) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_random_forest_averages_trees() {
        let forest = Classifier::RandomForest(RandomForest {
            trees: vec![
                stump(0, 7.0, [1.0, 3.0], [3.0, 1.0]),
                stump(4, 300.0, [0.0, 2.0], [2.0, 0.0]),
            ],
        });
        forest.validate().unwrap();

        let mut x = [0.0; FEATURE_DIMENSION];
        x[0] = 6.5;
        x[4] = 330.0;
        // tree 1: left leaf 0.75, tree 2: right leaf 0.0
        let p = forest.predict_proba(&x).unwrap();
        assert!((p - 0.375).abs() < 1e-12);
    }

    #[test]
    fn test_threshold_boundary_goes_left() {
        let tree = stump(1, 5.0, [0.0, 1.0], [1.0, 0.0]);
        let mut x = [0.0; FEATURE_DIMENSION];
        x[1] = 5.0;
        assert_eq!(tree.predict_proba(&x).unwrap(), 1.0);
    }

    #[test]
    fn test_validate_rejects_backward_child() {
        let tree = DecisionTree {
            nodes: vec![
                TreeNode::Split {
                    feature: 0,
                    threshold: 1.0,
                    left: 0,
                    right: 1,
                },
                TreeNode::Leaf { value: [1.0, 1.0] },
            ],
        };
        assert!(tree.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_feature_and_empty() {
        assert!(stump(12, 1.0, [1.0, 0.0], [0.0, 1.0]).validate().is_err());
        assert!(RandomForest { trees: vec![] }.validate().is_err());
        assert!(stump(0, 1.0, [0.0, 0.0], [0.0, 1.0]).validate().is_err());
    }

    #[test]
    fn test_wrong_input_length() {
        let model = Classifier::LogisticRegression(LogisticRegression {
            coefficients: vec![0.0; FEATURE_DIMENSION],
            intercept: 0.0,
        });
        assert!(matches!(
            model.predict_proba(&[0.0; 9]),
            Err(InferenceError::InvalidInputShape { .. })
        ));
    }

    #[test]
    fn test_deserialize_tagged() {
        let forest: Classifier = serde_json::from_value(json!({
            "kind": "random_forest",
            "trees": [{"nodes": [
                {"feature": 0, "threshold": 7.0, "left": 1, "right": 2},
                {"value": [10.0, 30.0]},
                {"value": [30.0, 10.0]}
            ]}]
        }))
        .unwrap();
        assert_eq!(forest.describe(), "random_forest(1 trees)");

        let logistic: Classifier = serde_json::from_value(json!({
            "kind": "logistic_regression",
            "coefficients": vec![0.1; FEATURE_DIMENSION],
            "intercept": -0.2
        }))
        .unwrap();
        assert_eq!(logistic.describe(), "logistic_regression");
    }
}
