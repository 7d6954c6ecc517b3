use serde::Deserialize;

use crate::underwriting::features::{is_categorical_column, is_numeric_column};
use crate::underwriting::{FeatureRow, ScoringError};

/// Averaged ensemble of decision trees, as exported from a random forest pipeline.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ForestModel {
    pub trees: Vec<Tree>,
    #[serde(default = "super::default_threshold")]
    pub threshold: f64,
}

/// Flattened tree; node `0` is the root and children always follow their parent.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Tree {
    pub nodes: Vec<ForestNode>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ForestNode {
    /// Numeric split; values `<= threshold` go left.
    Split {
        feature: String,
        threshold: f64,
        left: usize,
        right: usize,
    },
    /// Categorical split; values equal to `equals` go left.
    Category {
        feature: String,
        equals: String,
        left: usize,
        right: usize,
    },
    /// Class-1 probability at this leaf.
    Leaf { value: f64 },
}

impl ForestModel {
    pub(super) fn validate(&self) -> Result<(), String> {
        super::check_threshold(self.threshold)?;

        if self.trees.is_empty() {
            return Err("forest has no trees".to_string());
        }

        for (index, tree) in self.trees.iter().enumerate() {
            tree.validate().map_err(|err| format!("tree {index}: {err}"))?;
        }

        Ok(())
    }

    pub(super) fn probability(&self, row: &FeatureRow) -> Result<f64, ScoringError> {
        if self.trees.is_empty() {
            return Err(ScoringError::InvalidModel("forest has no trees".to_string()));
        }

        let mut total = 0.0;
        for (index, tree) in self.trees.iter().enumerate() {
            total += tree
                .leaf_value(row)
                .map_err(|err| ScoringError::InvalidModel(format!("tree {index}: {err}")))?;
        }
        Ok(total / self.trees.len() as f64)
    }
}

impl Tree {
    fn validate(&self) -> Result<(), String> {
        if self.nodes.is_empty() {
            return Err("tree has no nodes".to_string());
        }

        let len = self.nodes.len();
        let check_children = |index: usize, left: usize, right: usize| {
            for child in [left, right] {
                if child <= index || child >= len {
                    return Err(format!(
                        "node {index} points to {child}, expected a later node below {len}"
                    ));
                }
            }
            Ok(())
        };

        for (index, node) in self.nodes.iter().enumerate() {
            match node {
                ForestNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    if !is_numeric_column(feature) {
                        return Err(format!("node {index} splits on unknown numeric column '{feature}'"));
                    }
                    if !threshold.is_finite() {
                        return Err(format!("node {index} has a non-finite threshold"));
                    }
                    check_children(index, *left, *right)?;
                }
                ForestNode::Category {
                    feature,
                    left,
                    right,
                    ..
                } => {
                    if !is_categorical_column(feature) {
                        return Err(format!(
                            "node {index} splits on unknown categorical column '{feature}'"
                        ));
                    }
                    check_children(index, *left, *right)?;
                }
                ForestNode::Leaf { value } => {
                    if !(0.0..=1.0).contains(value) {
                        return Err(format!("leaf {index} value {value} must lie in [0, 1]"));
                    }
                }
            }
        }

        Ok(())
    }

    // A walk visits each node at most once on a valid tree, so more steps than nodes is a cycle.
    fn leaf_value(&self, row: &FeatureRow) -> Result<f64, String> {
        let mut index = 0;
        for _ in 0..=self.nodes.len() {
            let node = self
                .nodes
                .get(index)
                .ok_or_else(|| format!("node {index} does not exist"))?;
            match node {
                ForestNode::Leaf { value } => return Ok(*value),
                ForestNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    let value = row.numeric(feature).unwrap_or(f64::NAN);
                    index = if value <= *threshold { *left } else { *right };
                }
                ForestNode::Category {
                    feature,
                    equals,
                    left,
                    right,
                } => {
                    let matches = row.categorical(feature) == Some(equals.as_str());
                    index = if matches { *left } else { *right };
                }
            }
        }
        Err(format!("walk did not reach a leaf within {} nodes", self.nodes.len()))
    }
}
