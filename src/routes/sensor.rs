// ABOUTME: Sensor telemetry routes: latest snapshot with prediction, history, key ranges, connectivity
// ABOUTME: The latest-snapshot route always returns the raw snapshot even if prediction fails
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nidra Sleep Intelligence

//! Sensor telemetry routes
//!
//! Store failures map to typed errors: no data is 404, an upstream error is
//! 502, an unreachable store is 503.

use crate::resources::ServerResources;
use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use nidra_core::errors::AppError;
use nidra_core::models::SnapshotPrediction;
use nidra_providers::{ConnectionStatus, SensorRecord};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::task;
use tracing::debug;

/// Latest snapshot with its prediction
#[derive(Debug, Serialize)]
pub struct LatestSensorResponse {
    /// Always `true`
    pub success: bool,
    /// Raw snapshot and prediction
    #[serde(flatten)]
    pub snapshot: SnapshotPrediction,
    /// When the snapshot was fetched (RFC 3339)
    pub timestamp: String,
}

/// History or range listing
#[derive(Debug, Serialize)]
pub struct SensorHistoryResponse {
    /// Always `true`
    pub success: bool,
    /// Number of records
    pub count: usize,
    /// Records in key order
    pub data: Vec<SensorRecord>,
    /// Requested bounds (range queries only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<RangeBounds>,
}

/// Echo of the requested key range
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RangeBounds {
    /// Inclusive start key
    pub start: Option<String>,
    /// Inclusive end key
    pub end: Option<String>,
}

/// `?limit=N`; unparseable values fall back to the configured default
#[derive(Debug, Default, Deserialize)]
struct HistoryQuery {
    #[serde(default)]
    limit: Option<String>,
}

/// Sensor telemetry routes
pub struct SensorRoutes;

impl SensorRoutes {
    /// Create all sensor routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/sensor/latest", get(Self::handle_latest))
            .route("/api/sensor/history", get(Self::handle_history))
            .route("/api/sensor/range", get(Self::handle_range))
            .route("/api/firebase/test", get(Self::handle_connection_test))
            .with_state(resources)
    }

    async fn handle_latest(
        State(resources): State<Arc<ServerResources>>,
    ) -> Result<Json<LatestSensorResponse>, AppError> {
        let snapshot = resources.telemetry.latest_snapshot().await?;
        let timestamp = snapshot.fetched_at.to_rfc3339();

        let service = Arc::clone(&resources.prediction);
        let data = snapshot.data;
        let snapshot = task::spawn_blocking(move || service.predict_from_snapshot(data))
            .await
            .map_err(|e| AppError::internal(format!("Prediction task failed: {e}")))?;

        debug!(
            prediction_ready = snapshot.prediction.is_ready(),
            "Latest sensor snapshot served"
        );

        Ok(Json(LatestSensorResponse {
            success: true,
            snapshot,
            timestamp,
        }))
    }

    async fn handle_history(
        State(resources): State<Arc<ServerResources>>,
        Query(query): Query<HistoryQuery>,
    ) -> Result<Json<SensorHistoryResponse>, AppError> {
        let limit = query
            .limit
            .as_deref()
            .and_then(|raw| raw.trim().parse::<u32>().ok())
            .unwrap_or(resources.config.telemetry.history_default_limit);

        let data = resources.telemetry.history(limit).await?;

        Ok(Json(SensorHistoryResponse {
            success: true,
            count: data.len(),
            data,
            range: None,
        }))
    }

    async fn handle_range(
        State(resources): State<Arc<ServerResources>>,
        Query(bounds): Query<RangeBounds>,
    ) -> Result<Json<SensorHistoryResponse>, AppError> {
        let data = resources
            .telemetry
            .range(bounds.start.as_deref(), bounds.end.as_deref())
            .await?;

        Ok(Json(SensorHistoryResponse {
            success: true,
            count: data.len(),
            data,
            range: Some(bounds),
        }))
    }

    async fn handle_connection_test(
        State(resources): State<Arc<ServerResources>>,
    ) -> Result<Json<ConnectionStatus>, AppError> {
        Ok(Json(resources.telemetry.test_connection().await?))
    }
}
