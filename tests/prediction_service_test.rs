// ABOUTME: Integration tests for the prediction service over the shipped sample forest
// ABOUTME: Covers direct, snapshot-driven, and standalone recommendation flows end to end
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nidra Sleep Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod helpers;

use helpers::test_utils::{
    fixed_classifier, init_test_logging, missing_classifier, prediction_service,
    sample_classifier,
};
use nidra_core::constants::messages::{MODEL_UNAVAILABLE, SNAPSHOT_PREPROCESSING_FAILED};
use nidra_core::errors::ErrorCode;
use nidra_core::models::{
    ClassId, Condition, Dosha, PredictionPayload, ResolvedCondition,
};
use nidra_intelligence::{ConditionCatalog, DietMatrix, ModelOutput};
use serde_json::json;

#[test]
fn test_direct_prediction_with_sample_forest() {
    init_test_logging();
    let service = prediction_service(sample_classifier());

    let result = service
        .predict(&json!({"bvp": 72, "acc_x": 0.1, "acc_y": -0.2, "acc_z": 9.8, "temp": 36.7}))
        .unwrap();

    assert_eq!(result.condition, ResolvedCondition::Known(Condition::NormalSleep));
    assert_eq!(result.raw_prediction, ClassId(0));
    assert_eq!(result.source, "ml_model");
    assert_eq!(result.recommendations.len(), 4);
    assert!(service.is_model_loaded());
}

#[test]
fn test_direct_prediction_classes() {
    let service = prediction_service(sample_classifier());

    let insomnia = service
        .predict(&json!({"bvp": 95, "acc_x": 0.1, "acc_y": 0.1, "acc_z": 0.1}))
        .unwrap();
    assert_eq!(insomnia.condition.label(), "Insomnia-like sleep");
    assert_eq!(insomnia.foods_to_eat[0], "Kiwi");

    let apnea = service.predict(&json!({"bvp": 45, "acc_z": 0.1})).unwrap();
    assert_eq!(apnea.condition.label(), "Apnea-like pattern");

    let awake = service
        .predict(&json!({"bvp": 70, "acc_x": 0.9, "acc_y": 0.9, "acc_z": 0.9}))
        .unwrap();
    assert_eq!(awake.condition.label(), "Awake");
}

#[test]
fn test_unavailable_model_is_reported_without_panicking() {
    let service = prediction_service(missing_classifier());
    assert!(!service.load_model());

    let error = service.predict(&json!({"bvp": 72})).unwrap_err();
    assert_eq!(error.code, ErrorCode::ModelUnavailable);
    assert_eq!(error.message, MODEL_UNAVAILABLE);

    match service.predict_payload(&json!({"bvp": 72})) {
        PredictionPayload::Failed(failure) => assert_eq!(failure.error, MODEL_UNAVAILABLE),
        PredictionPayload::Ready(result) => panic!("unexpected prediction {result:?}"),
    }
    let payload = serde_json::to_value(service.predict_payload(&json!({"bvp": 72}))).unwrap();
    assert_eq!(payload, json!({"error": MODEL_UNAVAILABLE}));
}

#[test]
fn test_invalid_features_are_rejected_before_classification() {
    let service = prediction_service(missing_classifier());

    let error = service.predict(&json!({"temp": "warm"})).unwrap_err();
    assert_eq!(error.code, ErrorCode::InvalidInput);
    assert!(error.message.starts_with("Prediction failed:"));
}

#[test]
fn test_out_of_range_class_resolves_to_unknown() {
    let service = prediction_service(fixed_classifier(ModelOutput::Score(7.0)));

    let result = service.predict(&json!({"bvp": 72})).unwrap();
    assert_eq!(result.condition, ResolvedCondition::Unknown);
    assert_eq!(result.condition.label(), "Unknown Condition");
    assert_eq!(result.raw_prediction, ClassId(7));

    let normal = ConditionCatalog::for_condition(Condition::NormalSleep);
    assert_eq!(result.foods_to_eat, normal.entry().foods_to_eat);
    assert_eq!(result.recommendations, normal.recommendations());
}

#[test]
fn test_unusable_model_output_is_a_prediction_failure() {
    let service = prediction_service(fixed_classifier(ModelOutput::Batch(Vec::new())));

    let error = service.predict(&json!({"bvp": 72})).unwrap_err();
    assert_eq!(error.code, ErrorCode::PredictionFailed);
    assert!(error.message.starts_with("Prediction failed:"));
}

#[test]
fn test_snapshot_without_climate_block_uses_default_temperature() {
    let service = prediction_service(sample_classifier());
    let snapshot = json!({
        "MAX30102": {"bpm": 61},
        "MPU6050": {"gyro": {"x": 0.0, "y": 0.0, "z": 0.0}}
    });

    let outcome = service.predict_from_snapshot(snapshot.clone());

    assert_eq!(outcome.sensor_data, snapshot);
    match outcome.prediction {
        PredictionPayload::Ready(result) => {
            assert_eq!(result.condition, ResolvedCondition::Known(Condition::NormalSleep));
        }
        PredictionPayload::Failed(failure) => panic!("prediction failed: {}", failure.error),
    }
}

#[test]
fn test_snapshot_preprocessing_failure_keeps_sensor_data() {
    let service = prediction_service(sample_classifier());
    let snapshot = json!({"DHT": {"temperature": "sensor offline"}});

    let outcome = service.predict_from_snapshot(snapshot.clone());

    assert_eq!(outcome.sensor_data, snapshot);
    assert_eq!(
        serde_json::to_value(&outcome.prediction).unwrap(),
        json!({"error": SNAPSHOT_PREPROCESSING_FAILED})
    );
}

#[test]
fn test_snapshot_with_unavailable_model_is_soft_failure() {
    let service = prediction_service(missing_classifier());

    let outcome = service.predict_from_snapshot(json!({"MAX30102": {"bpm": 58}}));

    assert!(!outcome.prediction.is_ready());
    let body = serde_json::to_value(&outcome).unwrap();
    assert_eq!(body["sensorData"]["MAX30102"]["bpm"], 58);
    assert_eq!(body["prediction"]["error"], MODEL_UNAVAILABLE);
}

#[test]
fn test_pitta_insomnia_recommendation() {
    let recommendation =
        nidra_server::services::PredictionService::recommend(Some("pitta"), "Insomnia-like sleep");
    let expected = DietMatrix::lookup(Dosha::Pitta, 2).entry();

    assert_eq!(recommendation.condition, "Insomnia-like sleep (Pitta)");
    assert_eq!(recommendation.foods_to_eat, expected.foods_to_eat);
    assert_eq!(recommendation.foods_to_avoid, expected.foods_to_avoid);
    assert_eq!(
        recommendation.recommendation_text,
        "Based on your Pitta Dosha and Insomnia-like sleep pattern, we recommend these specific dietary adjustments."
    );
}

#[test]
fn test_snapshot_null_readings_are_soft_failures() {
    let service = prediction_service(sample_classifier());

    for snapshot in [
        json!({"MAX30102": {"bpm": null}, "MPU6050": {"gyro": {"x": 0.0, "y": 0.0, "z": 0.0}}}),
        json!({"MAX30102": {"bpm": 61}, "MPU6050": {"gyro": null}}),
        json!({"MAX30102": null}),
        json!({"MAX30102": {"bpm": 61}, "DHT": null}),
    ] {
        let outcome = service.predict_from_snapshot(snapshot.clone());

        assert!(!outcome.prediction.is_ready(), "{snapshot} was classified");
        let body = serde_json::to_value(&outcome).unwrap();
        assert_eq!(body["sensorData"], snapshot);
        assert_eq!(body["prediction"], json!({"error": SNAPSHOT_PREPROCESSING_FAILED}));
    }
}
