// ABOUTME: Centralized resource container shared by all HTTP routes
// ABOUTME: Holds the configuration, prediction service, and telemetry store behind Arcs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nidra Sleep Intelligence

//! # Server Resources
//!
//! Built once at startup and handed to every route as axum state. The
//! classifier handle lives inside the prediction service and is never reached
//! through ambient globals.

use crate::config::environment::ServerConfig;
use crate::services::PredictionService;
use nidra_intelligence::ClassifierAdapter;
use nidra_providers::{initialize_shared_client, FirebaseStore, TelemetryStore};
use std::sync::Arc;

/// Centralized resource container for dependency injection
#[derive(Clone)]
pub struct ServerResources {
    /// Server configuration
    pub config: Arc<ServerConfig>,
    /// Prediction pipeline (owns the classifier handle)
    pub prediction: Arc<PredictionService>,
    /// Sensor telemetry store
    pub telemetry: Arc<dyn TelemetryStore>,
}

impl ServerResources {
    /// Assemble resources from already-built parts
    #[must_use]
    pub fn new(
        config: ServerConfig,
        prediction: PredictionService,
        telemetry: Arc<dyn TelemetryStore>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            prediction: Arc::new(prediction),
            telemetry,
        }
    }

    /// Build production resources: file-backed classifier and Firebase store
    ///
    /// The classifier starts unloaded; call
    /// [`PredictionService::load_model`] for the eager startup load.
    #[must_use]
    pub fn from_config(config: ServerConfig) -> Self {
        initialize_shared_client(
            config.telemetry.timeout_secs,
            config.telemetry.connect_timeout_secs,
        );

        let classifier = Arc::new(ClassifierAdapter::from_path(config.model.path.clone()));
        let prediction =
            PredictionService::new(classifier, config.model.condition_resolver.clone());
        let telemetry: Arc<dyn TelemetryStore> =
            Arc::new(FirebaseStore::new(config.telemetry.firebase.clone()));

        Self::new(config, prediction, telemetry)
    }
}
