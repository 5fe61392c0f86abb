// ABOUTME: Main library entry point for the Nidra sleep inference API
// ABOUTME: Wires configuration, logging, the prediction pipeline, telemetry, and HTTP routes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nidra Sleep Intelligence

#![deny(unsafe_code)]

//! # Nidra Server
//!
//! HTTP service that infers a sleep state from biometric sensor readings and
//! turns it, together with a constitutional dosha, into diet guidance.
//!
//! ## Architecture
//!
//! - **`nidra-core`**: error taxonomy, constants, and value objects
//! - **`nidra-intelligence`**: feature extraction, decision-forest classifier,
//!   condition resolution, and recommendation catalogs
//! - **`nidra-providers`**: Firebase telemetry store
//! - **this crate**: configuration, logging, the prediction service, and routes
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use nidra_server::config::environment::ServerConfig;
//! use nidra_server::resources::ServerResources;
//! use nidra_server::routes;
//! use std::sync::Arc;
//!
//! # fn example() -> anyhow::Result<()> {
//! let config = ServerConfig::from_env()?;
//! let resources = Arc::new(ServerResources::from_config(config));
//! resources.prediction.load_model();
//! let app = routes::router(&resources);
//! # let _ = app;
//! # Ok(())
//! # }
//! ```

/// Configuration management
pub mod config;

/// Logging configuration and subscriber setup
pub mod logging;

/// HTTP middleware (CORS, request tracing)
pub mod middleware;

/// Shared server resources
pub mod resources;

/// HTTP routes
pub mod routes;

/// Request-level services
pub mod services;

pub use nidra_core::errors;
pub use nidra_core::models;
