// ABOUTME: Domain value objects shared by the inference pipeline and HTTP surface
// ABOUTME: Feature vectors, sleep conditions, doshas, and the caller-facing result shapes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nidra Sleep Intelligence

//! Core data models
//!
//! All types here are immutable value objects created per request. None of them
//! is persisted or cached.

/// Fixed-order numeric feature vector
pub mod features;

/// Class ids, sleep conditions, and the resolved-condition wrapper
pub mod sleep;

/// Constitutional dosha categories
pub mod dosha;

/// Recommendation entries and prediction result shapes
pub mod recommendation;

pub use dosha::Dosha;
pub use features::FeatureVector;
pub use recommendation::{
    DietRecommendation, PredictionFailure, PredictionPayload, PredictionResult,
    RecommendationEntry, SnapshotPrediction,
};
pub use sleep::{ClassId, Condition, ResolvedCondition};
