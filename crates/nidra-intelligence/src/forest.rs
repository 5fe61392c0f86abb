// ABOUTME: Serialized decision-forest classifier used as the pre-trained sleep model
// ABOUTME: JSON artifact with CART-style trees, validated at load, majority-vote prediction
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nidra Sleep Intelligence

//! Decision forest model artifact
//!
//! The artifact is a JSON document:
//!
//! ```json
//! {
//!   "format_version": 1,
//!   "n_features": 5,
//!   "feature_names": ["bvp", "acc_x", "acc_y", "acc_z", "temp"],
//!   "classes": [0, 1, 2, 3, 4],
//!   "trees": [{"Node": {"feature_idx": 0, "threshold": 80.0,
//!              "left": {"Leaf": {"class_label": 0, "n_samples": 40}},
//!              "right": {"Leaf": {"class_label": 4, "n_samples": 12}}}}]
//! }
//! ```
//!
//! Each tree routes a sample left when `x[feature_idx] <= threshold`. The forest
//! predicts the majority class across trees; ties go to the lowest label.

use crate::classifier::{ModelLoadError, ModelOutput, SleepClassifier};
use nidra_core::constants::features::FEATURE_COUNT;
use nidra_core::constants::model::FORMAT_VERSION;
use nidra_core::models::FeatureVector;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Internal split node
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    /// Index of the feature to split on
    pub feature_idx: usize,
    /// Threshold value for the split
    pub threshold: f64,
    /// Left subtree (samples where feature <= threshold)
    pub left: Box<TreeNode>,
    /// Right subtree (samples where feature > threshold)
    pub right: Box<TreeNode>,
}

/// Terminal node carrying a class prediction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Leaf {
    /// Predicted class label
    pub class_label: i64,
    /// Number of training samples that reached this leaf
    #[serde(default)]
    pub n_samples: usize,
}

/// A node in a decision tree
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum TreeNode {
    /// Internal decision node with split condition
    Node(Node),
    /// Leaf node with class prediction
    Leaf(Leaf),
}

impl TreeNode {
    /// Depth of the tree rooted here (leaves have depth 0)
    #[must_use]
    pub fn depth(&self) -> usize {
        let mut max_depth = 0;
        let mut stack = vec![(self, 0_usize)];
        while let Some((node, depth)) = stack.pop() {
            match node {
                Self::Leaf(_) => max_depth = max_depth.max(depth),
                Self::Node(internal) => {
                    stack.push((&internal.left, depth + 1));
                    stack.push((&internal.right, depth + 1));
                }
            }
        }
        max_depth
    }

    fn predict_one(&self, x: &[f64]) -> i64 {
        let mut node = self;
        loop {
            match node {
                Self::Leaf(leaf) => return leaf.class_label,
                Self::Node(internal) => {
                    // Validation guarantees the index is in range
                    let value = x.get(internal.feature_idx).copied().unwrap_or(0.0);
                    node = if value <= internal.threshold {
                        &internal.left
                    } else {
                        &internal.right
                    };
                }
            }
        }
    }

    fn validate(&self, n_features: usize) -> Result<(), String> {
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            if let Self::Node(internal) = node {
                if internal.feature_idx >= n_features {
                    return Err(format!(
                        "split on feature {} but model has {n_features} features",
                        internal.feature_idx
                    ));
                }
                if !internal.threshold.is_finite() {
                    return Err(format!(
                        "non-finite threshold on feature {}",
                        internal.feature_idx
                    ));
                }
                stack.push(&internal.left);
                stack.push(&internal.right);
            }
        }
        Ok(())
    }
}

/// Ensemble of decision trees
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionForest {
    /// Artifact format version
    pub format_version: u32,
    /// Number of input features
    pub n_features: usize,
    /// Feature names in training order (informational)
    #[serde(default)]
    pub feature_names: Vec<String>,
    /// Class labels seen during training (informational)
    #[serde(default)]
    pub classes: Vec<i64>,
    /// Member trees
    pub trees: Vec<TreeNode>,
}

impl DecisionForest {
    /// Build a forest from trees, using the current format version
    #[must_use]
    pub fn new(trees: Vec<TreeNode>) -> Self {
        Self {
            format_version: FORMAT_VERSION,
            n_features: FEATURE_COUNT,
            feature_names: Vec::new(),
            classes: Vec::new(),
            trees,
        }
    }

    /// Deserialize and validate an artifact
    ///
    /// # Errors
    ///
    /// Returns [`ModelLoadError::Parse`] for malformed JSON and
    /// [`ModelLoadError::Invalid`] if validation fails.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, ModelLoadError> {
        let forest: Self = serde_json::from_slice(bytes).map_err(ModelLoadError::Parse)?;
        forest.validate()?;
        Ok(forest)
    }

    /// Check structural invariants
    ///
    /// # Errors
    ///
    /// Returns [`ModelLoadError::Invalid`] describing the first violation.
    pub fn validate(&self) -> Result<(), ModelLoadError> {
        if self.format_version != FORMAT_VERSION {
            return Err(ModelLoadError::Invalid(format!(
                "unsupported format version {} (expected {FORMAT_VERSION})",
                self.format_version
            )));
        }
        if self.n_features != FEATURE_COUNT {
            return Err(ModelLoadError::Invalid(format!(
                "model expects {} features, pipeline provides {FEATURE_COUNT}",
                self.n_features
            )));
        }
        if self.trees.is_empty() {
            return Err(ModelLoadError::Invalid("forest has no trees".to_owned()));
        }
        for (index, tree) in self.trees.iter().enumerate() {
            tree.validate(self.n_features)
                .map_err(|reason| ModelLoadError::Invalid(format!("tree {index}: {reason}")))?;
        }
        Ok(())
    }

    /// Majority vote across trees for one sample
    #[must_use]
    pub fn vote(&self, x: &[f64]) -> i64 {
        let mut counts: BTreeMap<i64, usize> = BTreeMap::new();
        for tree in &self.trees {
            *counts.entry(tree.predict_one(x)).or_insert(0) += 1;
        }

        // Ascending label order plus a strict comparison breaks ties low
        let (mut best_label, mut best_count) = (0, 0);
        for (label, count) in counts {
            if count > best_count {
                best_label = label;
                best_count = count;
            }
        }
        best_label
    }
}

impl SleepClassifier for DecisionForest {
    fn predict(&self, features: &FeatureVector) -> ModelOutput {
        // One-row batch, the shape a batched predict call returns
        ModelOutput::Batch(vec![ModelOutput::Label(self.vote(&features.to_array()))])
    }
}
