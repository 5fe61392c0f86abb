// ABOUTME: Fixed-order five-field feature vector consumed by the sleep classifier
// ABOUTME: Order is [bvp, acc_x, acc_y, acc_z, temp]; defaults come from constants::features
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nidra Sleep Intelligence

use crate::constants::features::{
    DEFAULT_ACC, DEFAULT_BVP, DEFAULT_TEMP_C, FEATURE_COUNT, FEATURE_NAMES,
};
use serde::{Deserialize, Serialize};

/// Normalized biometric features for one classification
///
/// All five fields are finite. Construct through the feature extractor, which
/// applies per-field defaults and rejects non-numeric input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    /// Pulse-signal proxy (blood volume pulse or pulse rate)
    pub bvp: f64,
    /// Motion proxy, x axis
    pub acc_x: f64,
    /// Motion proxy, y axis
    pub acc_y: f64,
    /// Motion proxy, z axis
    pub acc_z: f64,
    /// Body temperature in °C
    pub temp: f64,
}

impl FeatureVector {
    /// Build a vector from values already in classifier order
    #[must_use]
    pub const fn from_array(values: [f64; FEATURE_COUNT]) -> Self {
        let [bvp, acc_x, acc_y, acc_z, temp] = values;
        Self {
            bvp,
            acc_x,
            acc_y,
            acc_z,
            temp,
        }
    }

    /// Values in classifier order
    #[must_use]
    pub const fn to_array(&self) -> [f64; FEATURE_COUNT] {
        [self.bvp, self.acc_x, self.acc_y, self.acc_z, self.temp]
    }

    /// Field names paired with their values, in classifier order
    pub fn named_values(&self) -> impl Iterator<Item = (&'static str, f64)> {
        FEATURE_NAMES.into_iter().zip(self.to_array())
    }
}

impl Default for FeatureVector {
    fn default() -> Self {
        Self::from_array([DEFAULT_BVP, DEFAULT_ACC, DEFAULT_ACC, DEFAULT_ACC, DEFAULT_TEMP_C])
    }
}
