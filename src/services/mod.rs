// ABOUTME: Service layer composing the intelligence crate into request-level operations
// ABOUTME: Hosts the prediction pipeline orchestrator shared by all routes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nidra Sleep Intelligence

/// Prediction pipeline orchestrator
pub mod prediction;

pub use prediction::PredictionService;
