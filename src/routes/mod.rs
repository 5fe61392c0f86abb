// ABOUTME: Route module organization for the Nidra HTTP endpoints
// ABOUTME: Assembles domain routers and applies CORS, request-ID, and request tracing layers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nidra Sleep Intelligence

//! Route module for the Nidra server
//!
//! Each domain module holds route definitions and thin handlers that delegate
//! to the prediction service or the telemetry store.

/// Standalone dosha diet recommendation route
pub mod diet;
/// Health check and readiness routes
pub mod health;
/// Direct prediction route
pub mod predict;
/// Sensor telemetry routes
pub mod sensor;

pub use diet::DietRoutes;
pub use health::HealthRoutes;
pub use predict::PredictRoutes;
pub use sensor::SensorRoutes;

use crate::middleware::{request_span, setup_cors, MakeRequestUuid, REQUEST_ID_HEADER};
use crate::resources::ServerResources;
use axum::Router;
use http::HeaderName;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

/// Build the complete application router
pub fn router(resources: &Arc<ServerResources>) -> Router {
    let request_id_header = HeaderName::from_static(REQUEST_ID_HEADER);

    Router::new()
        .merge(HealthRoutes::routes(Arc::clone(resources)))
        .merge(PredictRoutes::routes(Arc::clone(resources)))
        .merge(SensorRoutes::routes(Arc::clone(resources)))
        .merge(DietRoutes::routes())
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(
                    request_id_header.clone(),
                    MakeRequestUuid,
                ))
                .layer(TraceLayer::new_for_http().make_span_with(request_span))
                .layer(PropagateRequestIdLayer::new(request_id_header)),
        )
        .layer(setup_cors(&resources.config.cors))
}
