// ABOUTME: Recommendation catalogs for the model-driven and standalone diet paths
// ABOUTME: Condition-keyed guidance and the dosha x sleep-state diet matrix, kept as separate tables
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nidra Sleep Intelligence

//! Recommendation Catalog
//!
//! Two independent lookup tables:
//!
//! - [`ConditionCatalog`]: five entries keyed by condition, used after
//!   classification. Carries general lifestyle recommendations as well as
//!   food lists.
//! - [`DietMatrix`]: fifteen entries keyed by dosha and sleep-state index,
//!   used by the standalone diet recommendation.
//!
//! Both are total: unknown keys degrade to documented defaults.

mod condition;
mod dosha;

pub use condition::{ConditionCatalog, ConditionGuidance};
pub use dosha::{DietEntry, DietMatrix};

fn to_owned_list(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| (*item).to_owned()).collect()
}
