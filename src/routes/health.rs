// ABOUTME: Health check route handlers for service monitoring and status endpoints
// ABOUTME: Reports liveness plus classifier readiness for load balancers and dashboards
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nidra Sleep Intelligence

//! Health check routes for service monitoring
//!
//! `/health` always answers 200 while the process is up. `/ready` answers 503
//! until the classifier holds a model.

use crate::resources::ServerResources;
use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use nidra_core::constants::service::SERVICE_NAME;
use serde_json::{json, Value};
use std::sync::Arc;

/// Health routes implementation
pub struct HealthRoutes;

impl HealthRoutes {
    /// Create all health check routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/health", get(Self::health_handler))
            .route("/ready", get(Self::ready_handler))
            .with_state(resources)
    }

    async fn health_handler(State(resources): State<Arc<ServerResources>>) -> Json<Value> {
        Json(json!({
            "status": "healthy",
            "service": SERVICE_NAME,
            "model_loaded": resources.prediction.is_model_loaded(),
            "timestamp": chrono::Utc::now().to_rfc3339()
        }))
    }

    async fn ready_handler(
        State(resources): State<Arc<ServerResources>>,
    ) -> (StatusCode, Json<Value>) {
        let (status, label) = if resources.prediction.is_model_loaded() {
            (StatusCode::OK, "ready")
        } else {
            (StatusCode::SERVICE_UNAVAILABLE, "model_unavailable")
        };

        (
            status,
            Json(json!({
                "status": label,
                "timestamp": chrono::Utc::now().to_rfc3339()
            })),
        )
    }
}
