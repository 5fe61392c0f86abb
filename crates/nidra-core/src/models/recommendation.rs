// ABOUTME: Recommendation entries and the caller-facing prediction result shapes
// ABOUTME: PredictionResult, snapshot wrapper, and the standalone dosha diet recommendation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nidra Sleep Intelligence

use super::sleep::{ClassId, ResolvedCondition};
use crate::constants::model::PREDICTION_SOURCE;
use serde::{Deserialize, Serialize};

/// Ordered food lists
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationEntry {
    /// Foods to favour
    pub foods_to_eat: Vec<String>,
    /// Foods to avoid
    pub foods_to_avoid: Vec<String>,
}

/// Result of a model-driven prediction
///
/// Built fresh per call and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    /// Resolved condition label
    pub condition: ResolvedCondition,
    /// Always `"ml_model"`
    pub source: String,
    /// Class id exactly as returned by the classifier
    pub raw_prediction: ClassId,
    /// General lifestyle recommendations for the condition
    pub recommendations: Vec<String>,
    /// Foods to favour
    pub foods_to_eat: Vec<String>,
    /// Foods to avoid
    pub foods_to_avoid: Vec<String>,
}

impl PredictionResult {
    /// Assemble a model-driven result
    #[must_use]
    pub fn from_model(
        condition: ResolvedCondition,
        raw_prediction: ClassId,
        recommendations: Vec<String>,
        entry: RecommendationEntry,
    ) -> Self {
        Self {
            condition,
            source: PREDICTION_SOURCE.to_owned(),
            raw_prediction,
            recommendations,
            foods_to_eat: entry.foods_to_eat,
            foods_to_avoid: entry.foods_to_avoid,
        }
    }
}

/// Soft failure attached where a prediction would otherwise be
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionFailure {
    /// Human-readable reason
    pub error: String,
}

impl PredictionFailure {
    /// Wrap a message
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// Prediction outcome embedded in a larger response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PredictionPayload {
    /// Successful prediction
    Ready(PredictionResult),
    /// Isolated failure; the enclosing response still succeeds
    Failed(PredictionFailure),
}

impl PredictionPayload {
    /// Whether a prediction was produced
    #[must_use]
    pub const fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }
}

/// Snapshot-driven prediction: untouched sensor data plus the prediction outcome
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotPrediction {
    /// Raw snapshot exactly as supplied by the telemetry store
    #[serde(rename = "sensorData")]
    pub sensor_data: serde_json::Value,
    /// Prediction or soft failure
    pub prediction: PredictionPayload,
}

/// Standalone dosha × sleep-state diet recommendation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DietRecommendation {
    /// `"{disorder} ({dosha})"`
    pub condition: String,
    /// Foods to favour
    pub foods_to_eat: Vec<String>,
    /// Foods to avoid
    pub foods_to_avoid: Vec<String>,
    /// Summary naming the dosha and disorder
    pub recommendation_text: String,
}
