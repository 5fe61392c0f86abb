// ABOUTME: Integration tests for environment-driven server configuration
// ABOUTME: Defaults, overrides, class mapping parsing, and secret-free summaries
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nidra Sleep Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use nidra_core::models::{ClassId, Condition, ResolvedCondition};
use nidra_intelligence::ConditionResolver;
use nidra_server::config::environment::{Environment, ServerConfig};
use serial_test::serial;
use std::env;
use std::path::PathBuf;

const VARS: [&str; 13] = [
    "PORT",
    "HOST",
    "ENVIRONMENT",
    "NIDRA_MODEL_PATH",
    "NIDRA_CLASS_MAPPING",
    "FIREBASE_DATABASE_URL",
    "FIREBASE_API_KEY",
    "SENSOR_LATEST_PATH",
    "SENSOR_HISTORY_PATH",
    "TELEMETRY_TIMEOUT_SECS",
    "TELEMETRY_CONNECT_TIMEOUT_SECS",
    "SENSOR_HISTORY_DEFAULT_LIMIT",
    "CORS_ALLOWED_ORIGINS",
];

fn clear_env() {
    for var in VARS {
        env::remove_var(var);
    }
}

#[test]
#[serial]
fn test_defaults_without_environment() {
    clear_env();

    let config = ServerConfig::from_env().unwrap();

    assert_eq!(config.http_port, 10000);
    assert_eq!(config.host, "0.0.0.0");
    assert_eq!(config.environment, Environment::Development);
    assert_eq!(
        config.model.path,
        PathBuf::from("model/sleep_disorder_forest.json")
    );
    assert_eq!(config.model.condition_resolver, ConditionResolver::default());
    assert_eq!(config.telemetry.firebase.latest_path, "sensorData");
    assert_eq!(config.telemetry.firebase.history_path, "sensor_data");
    assert!(config.telemetry.firebase.api_key.is_none());
    assert_eq!(config.telemetry.history_default_limit, 100);
    assert_eq!(config.cors.allowed_origins, "*");
}

#[test]
#[serial]
fn test_environment_overrides() {
    clear_env();
    env::set_var("PORT", "8088");
    env::set_var("ENVIRONMENT", "production");
    env::set_var("NIDRA_MODEL_PATH", "/srv/models/forest.json");
    env::set_var("FIREBASE_DATABASE_URL", "https://sleep-lab.firebaseio.com");
    env::set_var("FIREBASE_API_KEY", "secret-token");
    env::set_var("SENSOR_HISTORY_DEFAULT_LIMIT", "25");
    env::set_var("CORS_ALLOWED_ORIGINS", "https://a.example, https://b.example");

    let config = ServerConfig::from_env().unwrap();
    clear_env();

    assert_eq!(config.http_port, 8088);
    assert!(config.environment.is_production());
    assert_eq!(config.model.path, PathBuf::from("/srv/models/forest.json"));
    assert_eq!(
        config.telemetry.firebase.database_url,
        "https://sleep-lab.firebaseio.com"
    );
    assert_eq!(
        config.telemetry.firebase.api_key.as_deref(),
        Some("secret-token")
    );
    assert_eq!(config.telemetry.history_default_limit, 25);

    let summary = config.summary();
    assert!(!summary.contains("secret-token"));
    assert!(summary.contains("/srv/models/forest.json"));
}

#[test]
#[serial]
fn test_blank_api_key_is_ignored() {
    clear_env();
    env::set_var("FIREBASE_API_KEY", "   ");

    let config = ServerConfig::from_env().unwrap();
    clear_env();

    assert!(config.telemetry.firebase.api_key.is_none());
}

#[test]
#[serial]
fn test_invalid_port_is_an_error() {
    clear_env();
    env::set_var("PORT", "eighty");

    let result = ServerConfig::from_env();
    clear_env();

    assert!(result.is_err());
}

#[test]
#[serial]
fn test_class_mapping_override() {
    clear_env();
    env::set_var(
        "NIDRA_CLASS_MAPPING",
        r#"{"0": "Awake", "1": "Normal sleep", "2": "Disturbed sleep", "3": "Insomnia-like sleep", "4": "Apnea-like pattern"}"#,
    );

    let config = ServerConfig::from_env().unwrap();
    clear_env();

    let resolver = config.model.condition_resolver;
    assert_eq!(
        resolver.resolve(ClassId(0)),
        ResolvedCondition::Known(Condition::Awake)
    );
    assert_eq!(
        resolver.resolve(ClassId(4)),
        ResolvedCondition::Known(Condition::ApneaLike)
    );
    assert_eq!(resolver.resolve(ClassId(5)), ResolvedCondition::Unknown);
}

#[test]
#[serial]
fn test_class_mapping_with_duplicate_condition_is_rejected() {
    clear_env();
    env::set_var(
        "NIDRA_CLASS_MAPPING",
        r#"{"0": "Awake", "1": "Awake", "2": "Disturbed sleep", "3": "Insomnia-like sleep", "4": "Apnea-like pattern"}"#,
    );

    let result = ServerConfig::from_env();
    clear_env();

    assert!(result.is_err());
}
