// ABOUTME: Configuration management module for centralized server settings
// ABOUTME: Environment-driven settings for the HTTP surface, model artifact, telemetry, and CORS
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nidra Sleep Intelligence

//! Configuration module for the Nidra server
//!
//! All settings come from environment variables (see [`environment`]); the
//! binary may override the port and model path from the command line.

/// Environment and server configuration
pub mod environment;

pub use environment::{
    CorsConfig, Environment, ModelConfig, ServerConfig, TelemetryConfig,
};
