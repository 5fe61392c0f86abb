// ABOUTME: Core types and constants for the Nidra sleep inference platform
// ABOUTME: Foundation crate with error handling, constants, and domain value objects
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nidra Sleep Intelligence

#![deny(unsafe_code)]

//! # Nidra Core
//!
//! Foundation crate providing shared types and constants for the Nidra sleep
//! inference platform. This crate is designed to change infrequently, enabling
//! incremental compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and `ErrorResponse`
//! - **constants**: Feature defaults, fixed labels, and caller-facing messages
//! - **models**: Immutable value objects (`FeatureVector`, `Condition`, `Dosha`, results)

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Domain value objects shared by the inference pipeline and the HTTP surface
pub mod models;
