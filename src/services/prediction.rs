// ABOUTME: Prediction pipeline orchestrator composing extraction, classification, and catalogs
// ABOUTME: Direct prediction, snapshot-driven prediction with soft failures, and diet recommendations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nidra Sleep Intelligence

//! Prediction Service
//!
//! Three flows:
//!
//! - **Direct**: flat feature record → [`PredictionResult`]. Invalid features
//!   and an unavailable model are typed errors.
//! - **Snapshot-driven**: nested sensor snapshot → [`SnapshotPrediction`]. The
//!   snapshot always comes back untouched; any failure is reported only inside
//!   the `prediction` field.
//! - **Standalone recommendation**: dosha + disorder label →
//!   [`DietRecommendation`], without touching the classifier.
//!
//! Classification may perform a synchronous model reload, so async callers
//! should run these methods on a blocking thread.

use nidra_core::constants::messages::SNAPSHOT_PREPROCESSING_FAILED;
use nidra_core::errors::{AppError, AppResult};
use nidra_core::models::{
    DietRecommendation, FeatureVector, PredictionFailure, PredictionPayload, PredictionResult,
    SnapshotPrediction,
};
use nidra_intelligence::{
    ClassifierAdapter, ConditionCatalog, ConditionResolver, DietMatrix, FeatureExtractor,
};
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, warn};

/// Orchestrates the inference-and-recommendation pipeline
#[derive(Debug, Clone)]
pub struct PredictionService {
    classifier: Arc<ClassifierAdapter>,
    resolver: ConditionResolver,
}

impl PredictionService {
    /// Create a service over a shared classifier
    #[must_use]
    pub const fn new(classifier: Arc<ClassifierAdapter>, resolver: ConditionResolver) -> Self {
        Self {
            classifier,
            resolver,
        }
    }

    /// Shared classifier handle
    #[must_use]
    pub const fn classifier(&self) -> &Arc<ClassifierAdapter> {
        &self.classifier
    }

    /// Whether the classifier currently holds a model
    #[must_use]
    pub fn is_model_loaded(&self) -> bool {
        self.classifier.is_loaded()
    }

    /// Eagerly (re)load the model, returning whether it succeeded
    pub fn load_model(&self) -> bool {
        self.classifier.load()
    }

    /// Direct flow: flat feature record → prediction
    ///
    /// Features are extracted before the classifier is touched, so an invalid
    /// payload never triggers a model reload.
    ///
    /// # Errors
    ///
    /// Returns an `INVALID_INPUT` error (`"Prediction failed: ..."`) for
    /// uncoercible features, `MODEL_UNAVAILABLE` if the model cannot be
    /// loaded, or `PREDICTION_FAILED` if the model output is unusable.
    pub fn predict(&self, raw: &Value) -> AppResult<PredictionResult> {
        let features = FeatureExtractor::from_features(raw)?;
        self.predict_features(&features)
    }

    /// Direct flow returning a result value instead of an error
    ///
    /// Failures become `{"error": "..."}` payloads.
    #[must_use]
    pub fn predict_payload(&self, raw: &Value) -> PredictionPayload {
        self.predict(raw)
            .map_or_else(|e| failure(&e), PredictionPayload::Ready)
    }

    /// Classify an already-extracted feature vector
    ///
    /// # Errors
    ///
    /// Returns `MODEL_UNAVAILABLE` or `PREDICTION_FAILED` as for [`Self::predict`].
    pub fn predict_features(&self, features: &FeatureVector) -> AppResult<PredictionResult> {
        let raw_prediction = self.classifier.classify(features)?;
        let condition = self.resolver.resolve(raw_prediction);
        let guidance = ConditionCatalog::by_condition(condition);

        info!(
            raw_prediction = raw_prediction.value(),
            condition = %condition,
            "Sleep state predicted"
        );

        Ok(PredictionResult::from_model(
            condition,
            raw_prediction,
            guidance.recommendations(),
            guidance.entry(),
        ))
    }

    /// Snapshot-driven flow: the snapshot is returned untouched with a prediction
    /// or a soft failure attached
    #[must_use]
    pub fn predict_from_snapshot(&self, snapshot: Value) -> SnapshotPrediction {
        let prediction = match FeatureExtractor::from_snapshot(&snapshot) {
            Ok(features) => self
                .predict_features(&features)
                .map_or_else(|e| failure(&e), PredictionPayload::Ready),
            Err(e) => {
                warn!(error = %e, "Snapshot preprocessing failed");
                PredictionPayload::Failed(PredictionFailure::new(SNAPSHOT_PREPROCESSING_FAILED))
            }
        };

        SnapshotPrediction {
            sensor_data: snapshot,
            prediction,
        }
    }

    /// Standalone dosha diet recommendation; never fails
    #[must_use]
    pub fn recommend(dosha: Option<&str>, disorder: &str) -> DietRecommendation {
        DietMatrix::recommend(dosha, disorder)
    }
}

fn failure(error: &AppError) -> PredictionPayload {
    warn!(code = ?error.code, error = %error.message, "Prediction failed");
    PredictionPayload::Failed(PredictionFailure::new(error.message.clone()))
}
