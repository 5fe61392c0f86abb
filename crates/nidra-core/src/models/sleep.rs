// ABOUTME: Sleep-state domain types: classifier class ids and the five named conditions
// ABOUTME: ResolvedCondition adds the "Unknown Condition" fallback for unmapped class ids
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nidra Sleep Intelligence

use crate::constants::messages::UNKNOWN_CONDITION;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Discrete class produced by the classifier
///
/// Known models emit ids in `0..=4`. Any other value is carried through as-is
/// and resolves to "Unknown Condition"; it is never an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClassId(pub i64);

impl ClassId {
    /// Plain integer value
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl From<i64> for ClassId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl fmt::Display for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Sleep-state condition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Condition {
    /// Normal sleep
    #[serde(rename = "Normal sleep")]
    NormalSleep,
    /// Disturbed sleep
    #[serde(rename = "Disturbed sleep")]
    DisturbedSleep,
    /// Insomnia-like sleep
    #[serde(rename = "Insomnia-like sleep")]
    InsomniaLike,
    /// Apnea-like breathing pattern
    #[serde(rename = "Apnea-like pattern")]
    ApneaLike,
    /// Awake
    #[serde(rename = "Awake")]
    Awake,
}

impl Condition {
    /// All conditions in sleep-state index order
    pub const ALL: [Self; 5] = [
        Self::NormalSleep,
        Self::DisturbedSleep,
        Self::InsomniaLike,
        Self::ApneaLike,
        Self::Awake,
    ];

    /// Human-readable label, also used as the wire value
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::NormalSleep => "Normal sleep",
            Self::DisturbedSleep => "Disturbed sleep",
            Self::InsomniaLike => "Insomnia-like sleep",
            Self::ApneaLike => "Apnea-like pattern",
            Self::Awake => "Awake",
        }
    }

    /// Exact-match lookup of a label
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.label() == label)
    }

    /// Position in the fixed label→index table used by the dosha diet matrix
    #[must_use]
    pub const fn state_index(self) -> usize {
        match self {
            Self::NormalSleep => 0,
            Self::DisturbedSleep => 1,
            Self::InsomniaLike => 2,
            Self::ApneaLike => 3,
            Self::Awake => 4,
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome of resolving a class id: a known condition or the unknown fallback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResolvedCondition {
    /// Class id mapped to a condition
    Known(Condition),
    /// Class id outside the mapping
    Unknown,
}

impl ResolvedCondition {
    /// Wire label (`"Unknown Condition"` for the fallback)
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Known(condition) => condition.label(),
            Self::Unknown => UNKNOWN_CONDITION,
        }
    }

    /// Parse a wire label; anything unrecognized is `Unknown`
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        Condition::from_label(label).map_or(Self::Unknown, Self::Known)
    }

    /// The known condition, if any
    #[must_use]
    pub const fn condition(self) -> Option<Condition> {
        match self {
            Self::Known(condition) => Some(condition),
            Self::Unknown => None,
        }
    }
}

impl From<Condition> for ResolvedCondition {
    fn from(condition: Condition) -> Self {
        Self::Known(condition)
    }
}

impl fmt::Display for ResolvedCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for ResolvedCondition {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for ResolvedCondition {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        Ok(Self::from_label(&label))
    }
}
