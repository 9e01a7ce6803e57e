//! Serialized model formats.
//!
//! A training run exports one JSON document tagged by `kind`:
//!
//! ```json
//! { "kind": "linear", "intercept": 41000.0, "coefficients": [2500.0, ...],
//!   "feature_names": ["YearsCodePro", ...] }
//! ```
//!
//! Trees use the flattened node arrays common to tree learners: node `i` is a
//! leaf when `children_left[i] == -1`, otherwise rows go left when
//! `x[feature[i]] <= threshold[i]`.

use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use crate::regressor::Regressor;

/// Ordinary least squares style model: `intercept + coefficients · x`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearModel {
    pub intercept: f64,
    pub coefficients: Vec<f64>,
}

impl LinearModel {
    fn predict_row(&self, row: &[f64]) -> Result<f64, ModelError> {
        if row.len() != self.coefficients.len() {
            return Err(ModelError::FeatureCount {
                expected: self.coefficients.len(),
                actual: row.len(),
            });
        }
        Ok(self.intercept
            + self
                .coefficients
                .iter()
                .zip(row)
                .map(|(weight, value)| weight * value)
                .sum::<f64>())
    }
}

/// Regression tree stored as parallel node arrays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTree {
    pub children_left: Vec<i64>,
    pub children_right: Vec<i64>,
    pub feature: Vec<i64>,
    pub threshold: Vec<f64>,
    pub value: Vec<f64>,
}

const LEAF: i64 = -1;

impl DecisionTree {
    pub fn node_count(&self) -> usize {
        self.value.len()
    }

    /// Checks array lengths and child indices.
    pub fn validate(&self) -> Result<(), ModelError> {
        let nodes = self.node_count();
        if nodes == 0 {
            return Err(ModelError::MalformedTree("tree has no nodes".to_string()));
        }
        let lengths = [
            self.children_left.len(),
            self.children_right.len(),
            self.feature.len(),
            self.threshold.len(),
        ];
        if lengths.iter().any(|len| *len != nodes) {
            return Err(ModelError::MalformedTree(format!(
                "node arrays disagree in length (value has {nodes})"
            )));
        }
        for (idx, (&left, &right)) in self.children_left.iter().zip(&self.children_right).enumerate()
        {
            let in_range = |child: i64| child == LEAF || (child > 0 && (child as usize) < nodes);
            if !in_range(left) || !in_range(right) || ((left == LEAF) != (right == LEAF)) {
                return Err(ModelError::MalformedTree(format!(
                    "node {idx} has invalid children ({left}, {right})"
                )));
            }
            if left != LEAF && self.feature[idx] < 0 {
                return Err(ModelError::MalformedTree(format!(
                    "split node {idx} has negative feature index"
                )));
            }
        }
        Ok(())
    }

    fn predict_row(&self, row: &[f64]) -> Result<f64, ModelError> {
        let mut node = 0usize;
        // A valid tree reaches a leaf in fewer steps than it has nodes.
        for _ in 0..self.node_count() {
            let left = self.children_left[node];
            if left == LEAF {
                return Ok(self.value[node]);
            }
            let feature = usize::try_from(self.feature[node]).map_err(|_| {
                ModelError::MalformedTree(format!("split node {node} has negative feature index"))
            })?;
            let Some(value) = row.get(feature) else {
                return Err(ModelError::FeatureCount {
                    expected: feature + 1,
                    actual: row.len(),
                });
            };
            node = if *value <= self.threshold[node] {
                left as usize
            } else {
                self.children_right[node] as usize
            };
        }
        Err(ModelError::MalformedTree("cycle detected".to_string()))
    }
}

/// Averaging ensemble of regression trees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomForest {
    pub trees: Vec<DecisionTree>,
}

impl RandomForest {
    fn predict_row(&self, row: &[f64]) -> Result<f64, ModelError> {
        if self.trees.is_empty() {
            return Err(ModelError::EmptyForest);
        }
        let mut total = 0.0;
        for tree in &self.trees {
            total += tree.predict_row(row)?;
        }
        Ok(total / self.trees.len() as f64)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelSpec {
    Linear(LinearModel),
    DecisionTree(DecisionTree),
    RandomForest(RandomForest),
}

/// A deserialized model artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature_names: Option<Vec<String>>,
    #[serde(flatten)]
    pub model: ModelSpec,
}

impl ModelArtifact {
    pub fn new(model: ModelSpec) -> Self {
        Self {
            feature_names: None,
            model,
        }
    }

    #[must_use]
    pub fn with_feature_names(mut self, names: Vec<String>) -> Self {
        self.feature_names = Some(names);
        self
    }

    /// Structural checks that do not need a feature row.
    pub fn validate(&self) -> Result<(), ModelError> {
        match &self.model {
            ModelSpec::Linear(linear) => {
                if let Some(names) = &self.feature_names
                    && names.len() != linear.coefficients.len()
                {
                    return Err(ModelError::FeatureCount {
                        expected: names.len(),
                        actual: linear.coefficients.len(),
                    });
                }
                Ok(())
            }
            ModelSpec::DecisionTree(tree) => tree.validate(),
            ModelSpec::RandomForest(forest) => {
                if forest.trees.is_empty() {
                    return Err(ModelError::EmptyForest);
                }
                forest.trees.iter().try_for_each(DecisionTree::validate)
            }
        }
    }
}

impl Regressor for ModelArtifact {
    fn kind(&self) -> &'static str {
        match self.model {
            ModelSpec::Linear(_) => "linear",
            ModelSpec::DecisionTree(_) => "decision_tree",
            ModelSpec::RandomForest(_) => "random_forest",
        }
    }

    fn feature_names(&self) -> Option<&[String]> {
        self.feature_names.as_deref()
    }

    fn predict(&self, rows: &[&[f64]]) -> Result<Vec<f64>, ModelError> {
        rows.iter()
            .map(|row| match &self.model {
                ModelSpec::Linear(linear) => linear.predict_row(row),
                ModelSpec::DecisionTree(tree) => tree.predict_row(row),
                ModelSpec::RandomForest(forest) => forest.predict_row(row),
            })
            .collect()
    }
}
