// ABOUTME: HTTP middleware for the Nidra server
// ABOUTME: CORS configuration and request-ID tracing applied to the whole router
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nidra Sleep Intelligence

/// CORS configuration
pub mod cors;
/// Request IDs and per-request spans
pub mod tracing;

pub use self::cors::setup_cors;
pub use self::tracing::{request_span, MakeRequestUuid, REQUEST_ID_HEADER};
