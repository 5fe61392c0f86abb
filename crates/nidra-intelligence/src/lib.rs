// ABOUTME: Sleep-state inference and diet recommendation engine for the Nidra platform
// ABOUTME: Pure, synchronous building blocks composed by the server's prediction service
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nidra Sleep Intelligence

#![deny(unsafe_code)]

//! # Nidra Intelligence
//!
//! The inference-and-recommendation core:
//!
//! - **features**: normalizes flat biometric records and nested sensor snapshots
//!   into a [`FeatureVector`](nidra_core::models::FeatureVector)
//! - **forest**: the serialized decision-forest model artifact
//! - **classifier**: owns the loaded model handle (load-once-under-lock, lazy reload)
//! - **condition**: class id → sleep condition mapping with an unknown fallback
//! - **catalog**: condition-keyed guidance and the dosha × sleep-state diet matrix
//!
//! Everything except the one-time model load is pure and side-effect free.

/// Feature extraction from direct payloads and sensor snapshots
pub mod features;

/// Decision-forest model artifact
pub mod forest;

/// Classifier lifecycle and invocation
pub mod classifier;

/// Class id to condition resolution
pub mod condition;

/// Static recommendation catalogs
pub mod catalog;

pub use catalog::{ConditionCatalog, ConditionGuidance, DietEntry, DietMatrix};
pub use classifier::{
    ClassifierAdapter, ClassifierError, FileModelSource, ModelLoadError, ModelOutput,
    ModelSource, ModelState, SleepClassifier,
};
pub use condition::{ClassMappingError, ConditionResolver};
pub use features::{FeatureError, FeatureExtractor};
pub use forest::{DecisionForest, Leaf, Node, TreeNode};
