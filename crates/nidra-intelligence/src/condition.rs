// ABOUTME: Resolves classifier class ids to named sleep conditions
// ABOUTME: Overridable id→condition bijection; unmapped ids degrade to "Unknown Condition"
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nidra Sleep Intelligence

use nidra_core::models::{ClassId, Condition, ResolvedCondition};
use std::collections::{BTreeMap, HashSet};
use thiserror::Error;

/// Invalid class mapping override
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClassMappingError {
    /// A label is not one of the five known conditions
    #[error("unknown condition label '{0}'")]
    UnknownLabel(String),
    /// A class id key is not an integer
    #[error("class id '{0}' is not an integer")]
    InvalidClassId(String),
    /// Two class ids map to the same condition
    #[error("condition '{0}' is mapped more than once")]
    DuplicateCondition(&'static str),
    /// Not every condition has a class id
    #[error("mapping covers {found} of {expected} conditions")]
    Incomplete {
        /// Conditions covered
        found: usize,
        /// Conditions required
        expected: usize,
    },
}

/// Class id → condition lookup
///
/// The default mapping binds ids `0..=4` to the conditions in
/// [`Condition::ALL`] order. It has never been verified against the training
/// labels, so deployments may override it with [`ConditionResolver::with_mapping`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConditionResolver {
    mapping: BTreeMap<ClassId, Condition>,
}

impl Default for ConditionResolver {
    fn default() -> Self {
        let mapping = Condition::ALL
            .into_iter()
            .zip(0_i64..)
            .map(|(condition, id)| (ClassId(id), condition))
            .collect();
        Self { mapping }
    }
}

impl ConditionResolver {
    /// Resolver with an explicit mapping
    ///
    /// # Errors
    ///
    /// Returns [`ClassMappingError`] unless the mapping is a bijection onto the
    /// five known conditions.
    pub fn with_mapping(
        mapping: impl IntoIterator<Item = (ClassId, Condition)>,
    ) -> Result<Self, ClassMappingError> {
        let mapping: BTreeMap<ClassId, Condition> = mapping.into_iter().collect();

        let mut seen = HashSet::new();
        for condition in mapping.values() {
            if !seen.insert(*condition) {
                return Err(ClassMappingError::DuplicateCondition(condition.label()));
            }
        }
        if seen.len() != Condition::ALL.len() || mapping.len() != Condition::ALL.len() {
            return Err(ClassMappingError::Incomplete {
                found: seen.len(),
                expected: Condition::ALL.len(),
            });
        }

        Ok(Self { mapping })
    }

    /// Resolver from string keys and labels, e.g. `{"0": "Normal sleep"}`
    ///
    /// # Errors
    ///
    /// Returns [`ClassMappingError`] for non-integer ids, unknown labels, or a
    /// mapping that is not a bijection.
    pub fn from_labels<'a>(
        entries: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Result<Self, ClassMappingError> {
        let parsed = entries
            .into_iter()
            .map(|(id, label)| {
                let id = id
                    .trim()
                    .parse::<i64>()
                    .map_err(|_| ClassMappingError::InvalidClassId(id.to_owned()))?;
                let condition = Condition::from_label(label)
                    .ok_or_else(|| ClassMappingError::UnknownLabel(label.to_owned()))?;
                Ok((ClassId(id), condition))
            })
            .collect::<Result<Vec<_>, ClassMappingError>>()?;

        Self::with_mapping(parsed)
    }

    /// Resolve a class id; ids outside the mapping are `Unknown`
    #[must_use]
    pub fn resolve(&self, class_id: ClassId) -> ResolvedCondition {
        self.mapping
            .get(&class_id)
            .copied()
            .map_or(ResolvedCondition::Unknown, ResolvedCondition::Known)
    }

    /// Current mapping in class id order
    pub fn entries(&self) -> impl Iterator<Item = (ClassId, Condition)> + '_ {
        self.mapping.iter().map(|(id, condition)| (*id, *condition))
    }
}
