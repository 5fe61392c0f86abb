// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Parses ports, model artifact location, class mapping override, Firebase, and CORS from env
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nidra Sleep Intelligence

//! Environment-based configuration management for production deployment

use anyhow::{Context, Result};
use nidra_core::constants::{model, network, telemetry};
use nidra_intelligence::ConditionResolver;
use nidra_providers::FirebaseConfig;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::info;

/// Deployment environment
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Production deployment
    Production,
    /// Automated tests
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Classifier artifact settings
#[derive(Debug, Clone)]
pub struct ModelConfig {
    /// Path of the serialized decision forest
    pub path: PathBuf,
    /// Class id → condition mapping (default unless `NIDRA_CLASS_MAPPING` is set)
    pub condition_resolver: ConditionResolver,
}

/// Telemetry store settings
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// Firebase connection
    pub firebase: FirebaseConfig,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Connect timeout in seconds
    pub connect_timeout_secs: u64,
    /// History entries returned when the caller gives no limit
    pub history_default_limit: u32,
}

/// CORS settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorsConfig {
    /// `*` or a comma-separated origin list
    pub allowed_origins: String,
}

/// Complete server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// HTTP port
    pub http_port: u16,
    /// Bind address
    pub host: String,
    /// Deployment environment
    pub environment: Environment,
    /// Classifier settings
    pub model: ModelConfig,
    /// Telemetry store settings
    pub telemetry: TelemetryConfig,
    /// CORS settings
    pub cors: CorsConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_port: network::DEFAULT_HTTP_PORT,
            host: network::DEFAULT_HOST.to_owned(),
            environment: Environment::default(),
            model: ModelConfig {
                path: PathBuf::from(model::DEFAULT_MODEL_PATH),
                condition_resolver: ConditionResolver::default(),
            },
            telemetry: TelemetryConfig {
                firebase: FirebaseConfig::default(),
                timeout_secs: telemetry::DEFAULT_TIMEOUT_SECS,
                connect_timeout_secs: telemetry::DEFAULT_CONNECT_TIMEOUT_SECS,
                history_default_limit: telemetry::DEFAULT_HISTORY_LIMIT,
            },
            cors: CorsConfig {
                allowed_origins: "*".to_owned(),
            },
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric variable does not parse or
    /// `NIDRA_CLASS_MAPPING` is not a valid class mapping.
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let config = Self {
            http_port: parse_env("PORT", network::DEFAULT_HTTP_PORT)?,
            host: env_var_or("HOST", network::DEFAULT_HOST),
            environment: Environment::from_str_or_default(&env_var_or(
                "ENVIRONMENT",
                "development",
            )),
            model: ModelConfig {
                path: PathBuf::from(env_var_or("NIDRA_MODEL_PATH", model::DEFAULT_MODEL_PATH)),
                condition_resolver: parse_class_mapping(env::var("NIDRA_CLASS_MAPPING").ok())?,
            },
            telemetry: TelemetryConfig {
                firebase: FirebaseConfig {
                    database_url: env_var_or(
                        "FIREBASE_DATABASE_URL",
                        telemetry::DEFAULT_DATABASE_URL,
                    ),
                    api_key: env::var("FIREBASE_API_KEY")
                        .ok()
                        .filter(|key| !key.trim().is_empty()),
                    latest_path: env_var_or("SENSOR_LATEST_PATH", telemetry::DEFAULT_LATEST_PATH),
                    history_path: env_var_or(
                        "SENSOR_HISTORY_PATH",
                        telemetry::DEFAULT_HISTORY_PATH,
                    ),
                },
                timeout_secs: parse_env("TELEMETRY_TIMEOUT_SECS", telemetry::DEFAULT_TIMEOUT_SECS)?,
                connect_timeout_secs: parse_env(
                    "TELEMETRY_CONNECT_TIMEOUT_SECS",
                    telemetry::DEFAULT_CONNECT_TIMEOUT_SECS,
                )?,
                history_default_limit: parse_env(
                    "SENSOR_HISTORY_DEFAULT_LIMIT",
                    telemetry::DEFAULT_HISTORY_LIMIT,
                )?,
            },
            cors: CorsConfig {
                allowed_origins: env_var_or("CORS_ALLOWED_ORIGINS", "*"),
            },
        };

        Ok(config)
    }

    /// Get a summary of the configuration for logging (without secrets)
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Nidra Server Configuration:\n\
             - Bind: {}:{}\n\
             - Environment: {}\n\
             - Model Artifact: {}\n\
             - Class Mapping: {}\n\
             - Firebase: {} (auth {})\n\
             - Telemetry Timeouts: {}s request / {}s connect\n\
             - CORS Origins: {}",
            self.host,
            self.http_port,
            self.environment,
            self.model.path.display(),
            self.model
                .condition_resolver
                .entries()
                .map(|(id, condition)| format!("{id}={condition}"))
                .collect::<Vec<_>>()
                .join(", "),
            self.telemetry.firebase.database_url,
            if self.telemetry.firebase.api_key.is_some() {
                "configured"
            } else {
                "none"
            },
            self.telemetry.timeout_secs,
            self.telemetry.connect_timeout_secs,
            self.cors.allowed_origins,
        )
    }
}

/// Get environment variable or default value
fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

/// Parse an environment variable, falling back to `default` when unset
fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("Invalid {key} value: {raw}")),
        Err(_) => Ok(default),
    }
}

/// Parse `NIDRA_CLASS_MAPPING`, e.g. `{"0": "Normal sleep", "1": "Awake", ...}`
fn parse_class_mapping(raw: Option<String>) -> Result<ConditionResolver> {
    let Some(raw) = raw.filter(|value| !value.trim().is_empty()) else {
        return Ok(ConditionResolver::default());
    };

    let entries: BTreeMap<String, String> =
        serde_json::from_str(&raw).context("NIDRA_CLASS_MAPPING must be a JSON object")?;
    ConditionResolver::from_labels(entries.iter().map(|(id, label)| (id.as_str(), label.as_str())))
        .context("Invalid NIDRA_CLASS_MAPPING")
}

#[cfg(test)]
mod tests {
    use super::*;
    use nidra_core::models::{ClassId, Condition, ResolvedCondition};

    #[test]
    fn test_environment_parsing() {
        assert_eq!(
            Environment::from_str_or_default("PROD"),
            Environment::Production
        );
        assert_eq!(Environment::from_str_or_default("test"), Environment::Testing);
        assert_eq!(
            Environment::from_str_or_default("staging"),
            Environment::Development
        );
    }

    #[test]
    fn test_missing_class_mapping_uses_default() {
        let resolver = parse_class_mapping(None).ok();
        assert_eq!(resolver, Some(ConditionResolver::default()));
    }

    #[test]
    fn test_class_mapping_override() {
        let raw = r#"{"0":"Awake","1":"Apnea-like pattern","2":"Insomnia-like sleep","3":"Disturbed sleep","4":"Normal sleep"}"#;
        let resolver = parse_class_mapping(Some(raw.to_owned())).ok();
        assert_eq!(
            resolver.map(|r| r.resolve(ClassId(4))),
            Some(ResolvedCondition::Known(Condition::NormalSleep))
        );
    }

    #[test]
    fn test_invalid_class_mapping_is_rejected() {
        assert!(parse_class_mapping(Some("[1,2]".to_owned())).is_err());
        assert!(parse_class_mapping(Some(r#"{"0":"Awake"}"#.to_owned())).is_err());
    }

    #[test]
    fn test_summary_hides_api_key() {
        let mut config = ServerConfig::default();
        config.telemetry.firebase.api_key = Some("super-secret".to_owned());
        let summary = config.summary();
        assert!(!summary.contains("super-secret"));
        assert!(summary.contains("auth configured"));
        assert!(summary.contains("0=Normal sleep"));
    }
}
