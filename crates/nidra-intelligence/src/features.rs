// ABOUTME: Feature extraction from flat biometric records and nested multi-sensor snapshots
// ABOUTME: Applies per-field defaults and rejects values that cannot be coerced to finite numbers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nidra Sleep Intelligence

//! Feature Extractor
//!
//! Two input shapes are supported:
//!
//! - **Direct**: a flat object with keys `bvp`, `acc_x`, `acc_y`, `acc_z`, `temp`.
//! - **Snapshot**: the telemetry store's nested structure keyed by sensor block
//!   (`MAX30102.bpm`, `MPU6050.gyro.{x,y,z}`, `DHT.temperature`).
//!
//! Missing fields take the defaults from [`nidra_core::constants::features`].
//! Present fields must be numbers, numeric strings, or booleans and must be
//! finite; anything else is a [`FeatureError`].

use nidra_core::constants::features::{DEFAULT_ACC, DEFAULT_BVP, DEFAULT_TEMP_C};
use nidra_core::constants::sensors;
use nidra_core::errors::AppError;
use nidra_core::models::FeatureVector;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};
use thiserror::Error;

/// Feature coercion failure
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FeatureError {
    /// The payload is not a JSON object
    #[error("expected a JSON object of features")]
    NotAnObject,
    /// A field is present but not convertible to a finite number
    #[error("could not convert feature '{field}' to a number: {reason}")]
    Coercion {
        /// Feature or sensor field name
        field: &'static str,
        /// Why the value was rejected
        reason: String,
    },
    /// A sensor block does not match the snapshot schema
    #[error("sensor snapshot is malformed: {reason}")]
    MalformedSnapshot {
        /// Deserializer message
        reason: String,
    },
}

impl From<FeatureError> for AppError {
    fn from(error: FeatureError) -> Self {
        Self::invalid_input(format!("Prediction failed: {error}"))
    }
}

/// Optional-field schema of a telemetry snapshot
///
/// Every block and field may be absent and then falls back to the per-feature
/// default. A block or reading that is present as `null` is rejected.
/// Unknown sensor blocks are ignored.
#[derive(Debug, Default, Deserialize)]
struct SnapshotSchema {
    #[serde(rename = "MAX30102", default, deserialize_with = "present")]
    pulse: Option<PulseBlock>,
    #[serde(rename = "MPU6050", default, deserialize_with = "present")]
    motion: Option<MotionBlock>,
    #[serde(rename = "DHT", default, deserialize_with = "present")]
    climate: Option<ClimateBlock>,
}

#[derive(Debug, Default, Deserialize)]
struct PulseBlock {
    #[serde(rename = "bpm", default, deserialize_with = "present")]
    pulse_rate: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
struct MotionBlock {
    #[serde(default, deserialize_with = "present")]
    gyro: Option<GyroAxes>,
}

#[derive(Debug, Default, Deserialize)]
struct GyroAxes {
    #[serde(default, deserialize_with = "present")]
    x: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    y: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    z: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
struct ClimateBlock {
    #[serde(rename = "temperature", default, deserialize_with = "present")]
    temperature: Option<Value>,
}

/// Deserialize a key that is present in the payload
///
/// Absent keys never reach this function (`default` yields `None`), so a
/// `null` is handed to `T` itself instead of collapsing into `None`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// Normalizes raw payloads into feature vectors
pub struct FeatureExtractor;

impl FeatureExtractor {
    /// Extract features from a flat record (direct mode)
    ///
    /// # Errors
    ///
    /// Returns [`FeatureError::NotAnObject`] if `raw` is not an object, or
    /// [`FeatureError::Coercion`] if a present field is not a finite number.
    pub fn from_features(raw: &Value) -> Result<FeatureVector, FeatureError> {
        let record = raw.as_object().ok_or(FeatureError::NotAnObject)?;

        Ok(FeatureVector {
            bvp: field(record, "bvp", DEFAULT_BVP)?,
            acc_x: field(record, "acc_x", DEFAULT_ACC)?,
            acc_y: field(record, "acc_y", DEFAULT_ACC)?,
            acc_z: field(record, "acc_z", DEFAULT_ACC)?,
            temp: field(record, "temp", DEFAULT_TEMP_C)?,
        })
    }

    /// Extract features from a nested sensor snapshot (snapshot mode)
    ///
    /// Pulse rate maps to `bvp`, gyroscope `x/y/z` to `acc_x/acc_y/acc_z`, and
    /// the climate block's temperature to `temp` (36.5 °C when absent).
    ///
    /// # Errors
    ///
    /// Returns [`FeatureError`] if the snapshot is not an object, a sensor block
    /// has the wrong shape or is `null`, or a present reading is not a finite
    /// number (`null` included).
    pub fn from_snapshot(raw: &Value) -> Result<FeatureVector, FeatureError> {
        if !raw.is_object() {
            return Err(FeatureError::NotAnObject);
        }
        let schema = SnapshotSchema::deserialize(raw).map_err(|e| {
            FeatureError::MalformedSnapshot {
                reason: e.to_string(),
            }
        })?;

        let pulse = schema.pulse.unwrap_or_default();
        let gyro = schema
            .motion
            .unwrap_or_default()
            .gyro
            .unwrap_or_default();
        let climate = schema.climate.unwrap_or_default();

        Ok(FeatureVector {
            bvp: coerce(sensors::PULSE_RATE_FIELD, pulse.pulse_rate.as_ref(), DEFAULT_BVP)?,
            acc_x: coerce("gyro.x", gyro.x.as_ref(), DEFAULT_ACC)?,
            acc_y: coerce("gyro.y", gyro.y.as_ref(), DEFAULT_ACC)?,
            acc_z: coerce("gyro.z", gyro.z.as_ref(), DEFAULT_ACC)?,
            temp: coerce(
                sensors::TEMPERATURE_FIELD,
                climate.temperature.as_ref(),
                DEFAULT_TEMP_C,
            )?,
        })
    }
}

fn field(record: &Map<String, Value>, name: &'static str, default: f64) -> Result<f64, FeatureError> {
    coerce(name, record.get(name), default)
}

/// Convert one optional JSON value to a finite `f64`
fn coerce(field: &'static str, value: Option<&Value>, default: f64) -> Result<f64, FeatureError> {
    let number = match value {
        None => return Ok(default),
        Some(Value::Number(n)) => n.as_f64().ok_or_else(|| FeatureError::Coercion {
            field,
            reason: format!("{n} is not representable as f64"),
        })?,
        Some(Value::String(s)) => s.trim().parse::<f64>().map_err(|_| FeatureError::Coercion {
            field,
            reason: format!("'{s}' is not numeric"),
        })?,
        Some(Value::Bool(b)) => f64::from(u8::from(*b)),
        Some(other) => {
            return Err(FeatureError::Coercion {
                field,
                reason: format!("unsupported value {other}"),
            })
        }
    };

    if number.is_finite() {
        Ok(number)
    } else {
        Err(FeatureError::Coercion {
            field,
            reason: format!("{number} is not finite"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_direct_mode_preserves_order() {
        let raw = json!({"bvp": 72, "acc_x": 0.1, "acc_y": -0.2, "acc_z": 9.8, "temp": 36.7});
        assert_eq!(
            FeatureExtractor::from_features(&raw).map(|v| v.to_array()),
            Ok([72.0, 0.1, -0.2, 9.8, 36.7])
        );
    }

    #[test]
    fn test_direct_mode_defaults_missing_fields() {
        assert_eq!(
            FeatureExtractor::from_features(&json!({})).map(|v| v.to_array()),
            Ok([0.0, 0.0, 0.0, 0.0, 36.5])
        );
        assert_eq!(
            FeatureExtractor::from_features(&json!({"bvp": 60})).map(|v| v.to_array()),
            Ok([60.0, 0.0, 0.0, 0.0, 36.5])
        );
        assert_eq!(
            FeatureExtractor::from_features(&json!({"temp": 37.2, "acc_z": 1})).map(|v| v.to_array()),
            Ok([0.0, 0.0, 0.0, 1.0, 37.2])
        );
    }

    #[test]
    fn test_direct_mode_accepts_numeric_strings() {
        assert_eq!(
            FeatureExtractor::from_features(&json!({"bvp": " 64.5 ", "subject": "S1"}))
                .map(|v| v.bvp),
            Ok(64.5)
        );
    }

    #[test]
    fn test_direct_mode_rejects_non_numeric() {
        let err = FeatureExtractor::from_features(&json!({"temp": "warm"}));
        assert!(matches!(err, Err(FeatureError::Coercion { field: "temp", .. })));

        let err = FeatureExtractor::from_features(&json!({"bvp": null}));
        assert!(matches!(err, Err(FeatureError::Coercion { field: "bvp", .. })));

        let err = FeatureExtractor::from_features(&json!({"acc_x": "nan"}));
        assert!(matches!(err, Err(FeatureError::Coercion { field: "acc_x", .. })));
    }

    #[test]
    fn test_direct_mode_rejects_non_object() {
        assert_eq!(
            FeatureExtractor::from_features(&json!([1, 2, 3])),
            Err(FeatureError::NotAnObject)
        );
    }

    #[test]
    fn test_snapshot_mode_maps_sensor_blocks() {
        let snapshot = json!({
            "MAX30102": {"bpm": 58, "spo2": 97},
            "MPU6050": {"gyro": {"x": 0.01, "y": "-0.02", "z": 0.03}, "accel": {"x": 1}},
            "DHT": {"temperature": 36.9, "humidity": 40}
        });
        assert_eq!(
            FeatureExtractor::from_snapshot(&snapshot).map(|v| v.to_array()),
            Ok([58.0, 0.01, -0.02, 0.03, 36.9])
        );
    }

    #[test]
    fn test_snapshot_mode_defaults_missing_blocks() {
        let snapshot = json!({"MAX30102": {"bpm": 61}, "MPU6050": {}});
        assert_eq!(
            FeatureExtractor::from_snapshot(&snapshot).map(|v| v.to_array()),
            Ok([61.0, 0.0, 0.0, 0.0, 36.5])
        );
    }

    #[test]
    fn test_snapshot_mode_rejects_malformed_block() {
        let err = FeatureExtractor::from_snapshot(&json!({"DHT": "offline"}));
        assert!(matches!(err, Err(FeatureError::MalformedSnapshot { .. })));
    }

    #[test]
    fn test_snapshot_mode_rejects_null_readings() {
        let err = FeatureExtractor::from_snapshot(&json!({"MAX30102": {"bpm": null}}));
        assert!(matches!(err, Err(FeatureError::Coercion { field: "bpm", .. })));

        let err = FeatureExtractor::from_snapshot(&json!({"MPU6050": {"gyro": {"x": 0.1, "y": null}}}));
        assert!(matches!(err, Err(FeatureError::Coercion { field: "gyro.y", .. })));

        let err = FeatureExtractor::from_snapshot(&json!({"DHT": {"temperature": null}}));
        assert!(matches!(err, Err(FeatureError::Coercion { .. })));
    }

    #[test]
    fn test_snapshot_mode_rejects_null_blocks() {
        for snapshot in [
            json!({"MAX30102": null}),
            json!({"MPU6050": {"gyro": null}}),
            json!({"MPU6050": null}),
            json!({"DHT": null}),
        ] {
            let err = FeatureExtractor::from_snapshot(&snapshot);
            assert!(
                matches!(err, Err(FeatureError::MalformedSnapshot { .. })),
                "{snapshot} gave {err:?}"
            );
        }
    }
}
