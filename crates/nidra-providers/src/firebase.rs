// ABOUTME: Firebase Realtime Database REST adapter for sensor snapshots and history
// ABOUTME: Latest snapshot, key-ordered history, key ranges, and a shallow connection probe
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nidra Sleep Intelligence

//! Firebase telemetry store
//!
//! Sensor devices write to two nodes of a Realtime Database:
//!
//! - the latest snapshot node (`sensorData` by default), overwritten on each
//!   reading and keyed by sensor block (`MAX30102`, `MPU6050`, `DHT`);
//! - the history node (`sensor_data` by default), one child per reading keyed
//!   by its timestamp.
//!
//! History and range queries order by key (`orderBy="$key"`). Each child is
//! flattened into a [`SensorRecord`] whose `timestamp` is the child key.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use nidra_core::constants::messages::{NO_HISTORY, NO_RANGE_DATA, NO_SENSOR_DATA};
use nidra_core::constants::telemetry::{
    DEFAULT_DATABASE_URL, DEFAULT_HISTORY_PATH, DEFAULT_LATEST_PATH,
};
use nidra_core::errors::AppError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, warn};

use crate::http_client::shared_client;

const SERVICE: &str = "Firebase";

/// Telemetry store failure
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// The node exists but holds no data
    #[error("{0}")]
    NoData(&'static str),
    /// The database answered with a non-success status
    #[error("Firebase request failed with status {status}")]
    Upstream {
        /// HTTP status code
        status: u16,
        /// Response body, for diagnostics
        body: String,
    },
    /// The database could not be reached
    #[error("Error contacting Firebase: {0}")]
    Transport(String),
    /// The response body was not valid JSON
    #[error("Invalid response from Firebase: {0}")]
    Parse(String),
    /// The store is missing required configuration
    #[error("Firebase is not configured: {0}")]
    NotConfigured(String),
}

impl From<TelemetryError> for AppError {
    fn from(error: TelemetryError) -> Self {
        match error {
            TelemetryError::NoData(message) => Self::not_found(message),
            TelemetryError::Upstream { status, body } => {
                Self::external_service(SERVICE, format!("request failed with status {status}"))
                    .with_details(serde_json::json!({ "status": status, "body": body }))
            }
            TelemetryError::Transport(reason) => Self::external_unavailable(SERVICE, reason),
            TelemetryError::Parse(reason) => {
                Self::external_service(SERVICE, format!("invalid response: {reason}"))
            }
            TelemetryError::NotConfigured(reason) => Self::config(reason),
        }
    }
}

impl From<reqwest::Error> for TelemetryError {
    fn from(error: reqwest::Error) -> Self {
        Self::Transport(error.to_string())
    }
}

/// Latest snapshot as stored, with the time it was fetched
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorSnapshot {
    /// Untouched snapshot body
    pub data: Value,
    /// When the snapshot was read
    pub fetched_at: DateTime<Utc>,
}

/// One flattened history entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorRecord {
    /// Child key of the entry
    pub timestamp: String,
    /// Entry fields; scalar entries are wrapped as `{"value": ...}`
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl SensorRecord {
    /// Flatten one child of the history node
    #[must_use]
    pub fn from_entry(key: impl Into<String>, value: Value) -> Self {
        let mut fields = match value {
            Value::Object(map) => map,
            scalar => {
                let mut map = Map::new();
                map.insert("value".to_owned(), scalar);
                map
            }
        };
        // The key wins over any stored timestamp field
        fields.remove("timestamp");

        Self {
            timestamp: key.into(),
            fields,
        }
    }
}

/// Result of the shallow connection probe
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionStatus {
    /// Always `true` for a successful probe
    pub success: bool,
    /// Human-readable outcome
    pub message: String,
    /// Database root that was probed
    pub database_url: String,
}

/// Sensor storage used by the snapshot-driven pipeline and the history endpoints
#[async_trait]
pub trait TelemetryStore: Send + Sync {
    /// Fetch the latest snapshot
    ///
    /// # Errors
    ///
    /// Returns [`TelemetryError::NoData`] if the node is empty, or a transport
    /// or upstream error.
    async fn latest_snapshot(&self) -> Result<SensorSnapshot, TelemetryError>;

    /// Fetch the last `limit` history entries in key order
    ///
    /// # Errors
    ///
    /// Returns [`TelemetryError::NoData`] if there is no history.
    async fn history(&self, limit: u32) -> Result<Vec<SensorRecord>, TelemetryError>;

    /// Fetch history entries with keys in `[start, end]`; either bound may be open
    ///
    /// # Errors
    ///
    /// Returns [`TelemetryError::NoData`] if the range is empty.
    async fn range(
        &self,
        start: Option<&str>,
        end: Option<&str>,
    ) -> Result<Vec<SensorRecord>, TelemetryError>;

    /// Probe the database root
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be reached or rejects the probe.
    async fn test_connection(&self) -> Result<ConnectionStatus, TelemetryError>;
}

/// Firebase connection settings
#[derive(Clone)]
pub struct FirebaseConfig {
    /// Database root, e.g. `https://<project>-default-rtdb.firebaseio.com`
    pub database_url: String,
    /// Database secret or ID token sent as the `auth` parameter
    pub api_key: Option<String>,
    /// Latest snapshot node
    pub latest_path: String,
    /// History node
    pub history_path: String,
}

impl Default for FirebaseConfig {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_owned(),
            api_key: None,
            latest_path: DEFAULT_LATEST_PATH.to_owned(),
            history_path: DEFAULT_HISTORY_PATH.to_owned(),
        }
    }
}

impl fmt::Debug for FirebaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FirebaseConfig")
            .field("database_url", &self.database_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("latest_path", &self.latest_path)
            .field("history_path", &self.history_path)
            .finish()
    }
}

impl FirebaseConfig {
    /// REST URL of a node (`{root}/{path}.json`); an empty path is the root
    #[must_use]
    pub fn node_url(&self, path: &str) -> String {
        let root = self.database_url.trim_end_matches('/');
        format!("{root}/{}.json", path.trim_matches('/'))
    }

    fn validate(&self) -> Result<(), TelemetryError> {
        if self.database_url.trim().is_empty() {
            return Err(TelemetryError::NotConfigured(
                "FIREBASE_DATABASE_URL is empty".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Firebase Realtime Database client
pub struct FirebaseStore {
    config: FirebaseConfig,
    http_client: reqwest::Client,
}

impl FirebaseStore {
    /// Store using the shared pooled HTTP client
    #[must_use]
    pub fn new(config: FirebaseConfig) -> Self {
        Self::with_client(config, shared_client().clone())
    }

    /// Store using a caller-supplied HTTP client
    #[must_use]
    pub const fn with_client(config: FirebaseConfig, http_client: reqwest::Client) -> Self {
        Self {
            config,
            http_client,
        }
    }

    /// Connection settings
    #[must_use]
    pub const fn config(&self) -> &FirebaseConfig {
        &self.config
    }

    async fn get(&self, path: &str, params: &[(&str, String)]) -> Result<Value, TelemetryError> {
        self.config.validate()?;

        let url = self.config.node_url(path);
        let mut query: Vec<(&str, String)> = Vec::with_capacity(params.len() + 1);
        if let Some(key) = &self.config.api_key {
            query.push(("auth", key.clone()));
        }
        query.extend(params.iter().cloned());

        let started = Instant::now();
        let response = self.http_client.get(&url).query(&query).send().await?;
        let status = response.status();
        let duration_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(path, status = status.as_u16(), duration_ms, "Firebase request failed");
            return Err(TelemetryError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        debug!(path, status = status.as_u16(), duration_ms, "Firebase request completed");

        response
            .json::<Value>()
            .await
            .map_err(|e| TelemetryError::Parse(e.to_string()))
    }

    async fn records(
        &self,
        params: &[(&str, String)],
        empty: &'static str,
    ) -> Result<Vec<SensorRecord>, TelemetryError> {
        let data = self.get(&self.config.history_path, params).await?;
        if is_empty_payload(&data) {
            return Err(TelemetryError::NoData(empty));
        }
        Ok(flatten_history(data))
    }
}

#[async_trait]
impl TelemetryStore for FirebaseStore {
    async fn latest_snapshot(&self) -> Result<SensorSnapshot, TelemetryError> {
        let data = self.get(&self.config.latest_path, &[]).await?;
        if is_empty_payload(&data) {
            return Err(TelemetryError::NoData(NO_SENSOR_DATA));
        }
        Ok(SensorSnapshot {
            data,
            fetched_at: Utc::now(),
        })
    }

    async fn history(&self, limit: u32) -> Result<Vec<SensorRecord>, TelemetryError> {
        let params = [
            ("orderBy", quoted("$key")),
            ("limitToLast", limit.to_string()),
        ];
        self.records(&params, NO_HISTORY).await
    }

    async fn range(
        &self,
        start: Option<&str>,
        end: Option<&str>,
    ) -> Result<Vec<SensorRecord>, TelemetryError> {
        let mut params = vec![("orderBy", quoted("$key"))];
        if let Some(start) = start.filter(|s| !s.is_empty()) {
            params.push(("startAt", quoted(start)));
        }
        if let Some(end) = end.filter(|s| !s.is_empty()) {
            params.push(("endAt", quoted(end)));
        }
        self.records(&params, NO_RANGE_DATA).await
    }

    async fn test_connection(&self) -> Result<ConnectionStatus, TelemetryError> {
        self.get("", &[("shallow", "true".to_owned())]).await?;
        Ok(ConnectionStatus {
            success: true,
            message: "Firebase connection successful".to_owned(),
            database_url: self.config.node_url("").replace(".json", ""),
        })
    }
}

/// Quote a value for Firebase query parameters (`"$key"`, `"1700000000"`)
fn quoted(value: &str) -> String {
    format!("\"{value}\"")
}

/// Falsy JSON bodies mean "no data"
#[must_use]
pub fn is_empty_payload(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

/// Flatten a keyed history node into records in key order
///
/// Integer-like keys make Firebase return an array; array slots become records
/// keyed by their index and `null` slots are skipped.
#[must_use]
pub fn flatten_history(data: Value) -> Vec<SensorRecord> {
    match data {
        Value::Object(map) => map
            .into_iter()
            .map(|(key, value)| SensorRecord::from_entry(key, value))
            .collect(),
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .filter(|(_, value)| !value.is_null())
            .map(|(index, value)| SensorRecord::from_entry(index.to_string(), value))
            .collect(),
        _ => Vec::new(),
    }
}
