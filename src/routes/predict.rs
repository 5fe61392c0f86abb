// ABOUTME: Direct prediction route: flat biometric features in, sleep condition and diet out
// ABOUTME: Runs classification on a blocking thread since it may reload the model artifact
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nidra Sleep Intelligence

use crate::resources::ServerResources;
use axum::{extract::State, routing::post, Json, Router};
use nidra_core::constants::messages::NO_DATA_PROVIDED;
use nidra_core::errors::AppError;
use nidra_core::models::PredictionResult;
use serde_json::Value;
use std::sync::Arc;
use tokio::task;

/// Direct prediction routes
pub struct PredictRoutes;

impl PredictRoutes {
    /// Create the prediction route
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/predict", post(Self::handle_predict))
            .with_state(resources)
    }

    /// `POST /predict` with `{"bvp", "acc_x", "acc_y", "acc_z", "temp"}`
    ///
    /// A missing body, invalid JSON, or an empty or non-object payload is
    /// rejected with `No data provided`.
    async fn handle_predict(
        State(resources): State<Arc<ServerResources>>,
        payload: Option<Json<Value>>,
    ) -> Result<Json<PredictionResult>, AppError> {
        let raw = match payload {
            Some(Json(Value::Object(map))) if !map.is_empty() => Value::Object(map),
            _ => return Err(AppError::invalid_input(NO_DATA_PROVIDED)),
        };

        let service = Arc::clone(&resources.prediction);
        let result = task::spawn_blocking(move || service.predict(&raw))
            .await
            .map_err(|e| AppError::internal(format!("Prediction task failed: {e}")))??;

        Ok(Json(result))
    }
}
