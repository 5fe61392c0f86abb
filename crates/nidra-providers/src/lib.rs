// ABOUTME: Telemetry store adapters for the Nidra sleep inference platform
// ABOUTME: Firebase Realtime Database REST client behind the TelemetryStore trait
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nidra Sleep Intelligence

#![deny(unsafe_code)]

//! Telemetry store adapters.
//!
//! The server only talks to sensor storage through [`TelemetryStore`]; the
//! Firebase implementation is the production backend.

/// Firebase Realtime Database telemetry store
pub mod firebase;
/// Shared HTTP client for telemetry calls
pub mod http_client;

pub use firebase::{
    ConnectionStatus, FirebaseConfig, FirebaseStore, SensorRecord, SensorSnapshot,
    TelemetryError, TelemetryStore,
};
pub use http_client::{initialize_shared_client, shared_client};
