// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Feature defaults, sensor block keys, fixed labels, and caller-facing messages
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nidra Sleep Intelligence

//! Constants module
//!
//! Constants are grouped by domain rather than kept in a single flat list.

/// Feature vector layout and per-field defaults
pub mod features {
    /// Number of features the classifier consumes
    pub const FEATURE_COUNT: usize = 5;

    /// Field names in the fixed order fed to the classifier
    pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = ["bvp", "acc_x", "acc_y", "acc_z", "temp"];

    /// Default pulse proxy when the field is absent
    pub const DEFAULT_BVP: f64 = 0.0;

    /// Default motion proxy when an axis is absent
    pub const DEFAULT_ACC: f64 = 0.0;

    /// Default body temperature (°C) when the field or sensor block is absent
    pub const DEFAULT_TEMP_C: f64 = 36.5;
}

/// Vendor-specific keys of the nested multi-sensor snapshot
pub mod sensors {
    /// Pulse oximeter block
    pub const PULSE_BLOCK: &str = "MAX30102";
    /// Pulse rate field inside the pulse block
    pub const PULSE_RATE_FIELD: &str = "bpm";
    /// Inertial measurement block
    pub const MOTION_BLOCK: &str = "MPU6050";
    /// Tri-axial gyroscope object inside the motion block
    pub const GYRO_FIELD: &str = "gyro";
    /// Temperature/humidity block
    pub const TEMPERATURE_BLOCK: &str = "DHT";
    /// Temperature field inside the temperature block
    pub const TEMPERATURE_FIELD: &str = "temperature";
}

/// Classifier and model artifact constants
pub mod model {
    /// Default location of the serialized classifier
    pub const DEFAULT_MODEL_PATH: &str = "model/sleep_disorder_forest.json";
    /// Supported artifact format version
    pub const FORMAT_VERSION: u32 = 1;
    /// Value of the `source` field on model-driven predictions
    pub const PREDICTION_SOURCE: &str = "ml_model";
}

/// Caller-facing messages whose wording is part of the response contract
pub mod messages {
    /// Returned when the classifier is unloaded and the lazy reload failed
    pub const MODEL_UNAVAILABLE: &str = "Model not loaded - reload failed. Check server logs.";
    /// Returned inside `prediction` when snapshot preprocessing fails
    pub const SNAPSHOT_PREPROCESSING_FAILED: &str = "Failed to process data for prediction";
    /// Condition name used for class ids outside the mapping
    pub const UNKNOWN_CONDITION: &str = "Unknown Condition";
    /// Returned when a prediction request carries no usable payload
    pub const NO_DATA_PROVIDED: &str = "No data provided";
    /// Returned when the telemetry store has no latest snapshot
    pub const NO_SENSOR_DATA: &str = "No sensor data available in Firebase";
    /// Returned when the telemetry store has no history
    pub const NO_HISTORY: &str = "No historical data available";
    /// Returned when the telemetry store has no data in the requested range
    pub const NO_RANGE_DATA: &str = "No data available in the specified range";
}

/// Service identity used in logs and health payloads
pub mod service {
    /// Service name reported by `/health`
    pub const SERVICE_NAME: &str = "sleep-monitoring-backend";
    /// Binary name used in structured startup logs
    pub const BINARY_NAME: &str = "nidra-server";
}

/// Network defaults
pub mod network {
    /// Default HTTP port
    pub const DEFAULT_HTTP_PORT: u16 = 10000;
    /// Default bind address
    pub const DEFAULT_HOST: &str = "0.0.0.0";
}

/// Telemetry store defaults
pub mod telemetry {
    /// Default realtime database URL
    pub const DEFAULT_DATABASE_URL: &str = "https://dht11-c3e82-default-rtdb.firebaseio.com";
    /// Path of the latest snapshot node
    pub const DEFAULT_LATEST_PATH: &str = "sensorData";
    /// Path of the keyed history node
    pub const DEFAULT_HISTORY_PATH: &str = "sensor_data";
    /// Default number of history records
    pub const DEFAULT_HISTORY_LIMIT: u32 = 100;
    /// Request timeout in seconds
    pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
    /// Connect timeout in seconds
    pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
}
