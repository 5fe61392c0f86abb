// ABOUTME: HTTP integration tests for health check routes
// ABOUTME: Liveness always answers; readiness tracks whether the classifier holds a model
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nidra Sleep Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod helpers;

use axum::http::StatusCode;
use helpers::axum_test::AxumTestRequest;
use helpers::test_utils::{
    missing_classifier, sample_classifier, test_resources, MemoryTelemetryStore,
};
use nidra_server::routes::HealthRoutes;

#[tokio::test]
async fn test_health_endpoint_success() {
    let resources = test_resources(sample_classifier(), MemoryTelemetryStore::default());

    let response = AxumTestRequest::get("/health")
        .send(HealthRoutes::routes(resources))
        .await;

    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "sleep-monitoring-backend");
    assert_eq!(body["model_loaded"], false);

    let timestamp = body["timestamp"].as_str().unwrap();
    assert!(chrono::DateTime::parse_from_rfc3339(timestamp).is_ok());
}

#[tokio::test]
async fn test_ready_endpoint_after_model_load() {
    let resources = test_resources(sample_classifier(), MemoryTelemetryStore::default());
    assert!(resources.prediction.load_model());

    let response = AxumTestRequest::get("/ready")
        .send(HealthRoutes::routes(resources))
        .await
        .assert_status(StatusCode::OK);

    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "ready");
}

#[tokio::test]
async fn test_ready_endpoint_without_model() {
    let resources = test_resources(missing_classifier(), MemoryTelemetryStore::default());
    assert!(!resources.prediction.load_model());

    let response = AxumTestRequest::get("/ready")
        .send(HealthRoutes::routes(resources))
        .await
        .assert_status(StatusCode::SERVICE_UNAVAILABLE);

    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "model_unavailable");
}

#[tokio::test]
async fn test_health_stays_up_without_model() {
    let resources = test_resources(missing_classifier(), MemoryTelemetryStore::default());

    let response = AxumTestRequest::get("/health")
        .send(HealthRoutes::routes(resources))
        .await;

    assert_eq!(response.status(), 200);
}
