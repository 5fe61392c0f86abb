// ABOUTME: Pipeline fixtures for integration tests: model sources, telemetry store, resources
// ABOUTME: In-memory stand-ins so routes and services run without Firebase or a trained model
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nidra Sleep Intelligence

use async_trait::async_trait;
use chrono::Utc;
use nidra_core::constants::messages::{NO_HISTORY, NO_RANGE_DATA, NO_SENSOR_DATA};
use nidra_core::models::FeatureVector;
use nidra_intelligence::{
    ClassifierAdapter, ConditionResolver, ModelLoadError, ModelOutput, ModelSource,
    SleepClassifier,
};
use nidra_providers::{
    ConnectionStatus, SensorRecord, SensorSnapshot, TelemetryError, TelemetryStore,
};
use nidra_server::config::environment::ServerConfig;
use nidra_server::resources::ServerResources;
use nidra_server::services::PredictionService;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Once};

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        let _ = tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .try_init();
    });
}

/// The sample forest shipped with the repository
pub fn sample_model_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("model/sleep_disorder_forest.json")
}

/// A path that never holds an artifact
pub fn missing_model_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("model/does-not-exist.json")
}

/// Classifier that always returns the same output
pub struct FixedClassifier(pub ModelOutput);

impl SleepClassifier for FixedClassifier {
    fn predict(&self, _features: &FeatureVector) -> ModelOutput {
        self.0.clone()
    }
}

/// Model source serving a [`FixedClassifier`], counting loads
pub struct FixedModelSource {
    output: ModelOutput,
    loads: Arc<AtomicUsize>,
}

impl FixedModelSource {
    pub fn new(output: ModelOutput) -> (Self, Arc<AtomicUsize>) {
        let loads = Arc::new(AtomicUsize::new(0));
        (
            Self {
                output,
                loads: Arc::clone(&loads),
            },
            loads,
        )
    }
}

impl ModelSource for FixedModelSource {
    fn load(&self) -> Result<Arc<dyn SleepClassifier>, ModelLoadError> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        Ok(Arc::new(FixedClassifier(self.output.clone())))
    }

    fn describe(&self) -> String {
        format!("fixed output {:?}", self.output)
    }
}

/// Adapter over the shipped sample forest
pub fn sample_classifier() -> ClassifierAdapter {
    ClassifierAdapter::from_path(sample_model_path())
}

/// Adapter whose artifact is missing
pub fn missing_classifier() -> ClassifierAdapter {
    ClassifierAdapter::from_path(missing_model_path())
}

/// Adapter that always predicts `output`
pub fn fixed_classifier(output: ModelOutput) -> ClassifierAdapter {
    ClassifierAdapter::new(Box::new(FixedModelSource::new(output).0))
}

/// Prediction service with the default class mapping
pub fn prediction_service(classifier: ClassifierAdapter) -> PredictionService {
    PredictionService::new(Arc::new(classifier), ConditionResolver::default())
}

/// In-memory telemetry store
#[derive(Default)]
pub struct MemoryTelemetryStore {
    latest: Option<Value>,
    history: BTreeMap<String, Value>,
    unreachable: bool,
}

impl MemoryTelemetryStore {
    pub fn with_latest(mut self, snapshot: Value) -> Self {
        self.latest = Some(snapshot);
        self
    }

    pub fn with_entry(mut self, key: &str, value: Value) -> Self {
        self.history.insert(key.to_owned(), value);
        self
    }

    pub fn unreachable() -> Self {
        Self {
            unreachable: true,
            ..Self::default()
        }
    }

    fn check_reachable(&self) -> Result<(), TelemetryError> {
        if self.unreachable {
            return Err(TelemetryError::Transport("connection refused".to_owned()));
        }
        Ok(())
    }

    fn records<'a>(
        entries: impl Iterator<Item = (&'a String, &'a Value)>,
    ) -> Vec<SensorRecord> {
        entries
            .map(|(key, value)| SensorRecord::from_entry(key.clone(), value.clone()))
            .collect()
    }
}

#[async_trait]
impl TelemetryStore for MemoryTelemetryStore {
    async fn latest_snapshot(&self) -> Result<SensorSnapshot, TelemetryError> {
        self.check_reachable()?;
        let data = self
            .latest
            .clone()
            .ok_or(TelemetryError::NoData(NO_SENSOR_DATA))?;
        Ok(SensorSnapshot {
            data,
            fetched_at: Utc::now(),
        })
    }

    async fn history(&self, limit: u32) -> Result<Vec<SensorRecord>, TelemetryError> {
        self.check_reachable()?;
        let skip = self.history.len().saturating_sub(limit as usize);
        let records = Self::records(self.history.iter().skip(skip));
        if records.is_empty() {
            return Err(TelemetryError::NoData(NO_HISTORY));
        }
        Ok(records)
    }

    async fn range(
        &self,
        start: Option<&str>,
        end: Option<&str>,
    ) -> Result<Vec<SensorRecord>, TelemetryError> {
        self.check_reachable()?;
        let records = Self::records(self.history.iter().filter(|(key, _)| {
            !start.is_some_and(|s| key.as_str() < s) && !end.is_some_and(|e| key.as_str() > e)
        }));
        if records.is_empty() {
            return Err(TelemetryError::NoData(NO_RANGE_DATA));
        }
        Ok(records)
    }

    async fn test_connection(&self) -> Result<ConnectionStatus, TelemetryError> {
        self.check_reachable()?;
        Ok(ConnectionStatus {
            success: true,
            message: "Firebase connection successful".to_owned(),
            database_url: "memory://telemetry".to_owned(),
        })
    }
}

/// Server resources over the given classifier and telemetry store
pub fn test_resources(
    classifier: ClassifierAdapter,
    telemetry: MemoryTelemetryStore,
) -> Arc<ServerResources> {
    init_test_logging();
    Arc::new(ServerResources::new(
        ServerConfig::default(),
        prediction_service(classifier),
        Arc::new(telemetry),
    ))
}
