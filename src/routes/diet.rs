// ABOUTME: Standalone dosha diet recommendation route, independent of the classifier
// ABOUTME: Always answers with a recommendation; unknown inputs fall back to documented defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nidra Sleep Intelligence

use crate::services::PredictionService;
use axum::{routing::post, Json, Router};
use nidra_core::models::DietRecommendation;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Disorder label used when the request names none
const UNKNOWN_DISORDER: &str = "Unknown";

/// Diet recommendation request
#[derive(Debug, Default, Deserialize)]
pub struct DietRecommendationRequest {
    /// Constitutional type; anything unrecognized means Vata
    #[serde(default, deserialize_with = "lenient_text")]
    pub dosha: Option<String>,
    /// Sleep-state label, e.g. `"Insomnia-like sleep"`
    #[serde(default, deserialize_with = "lenient_text")]
    pub disorder: Option<String>,
}

/// Keep a field only when it is a string; any other JSON value reads as absent
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => Some(text),
        _ => None,
    })
}

/// Diet recommendation routes
pub struct DietRoutes;

impl DietRoutes {
    /// Create the diet recommendation route
    pub fn routes() -> Router {
        Router::new().route("/api/diet-recommendation", post(Self::handle_recommendation))
    }

    /// `POST /api/diet-recommendation` with `{"dosha"?, "disorder"?}`
    ///
    /// An unreadable body is treated as an empty request.
    async fn handle_recommendation(
        payload: Option<Json<DietRecommendationRequest>>,
    ) -> Json<DietRecommendation> {
        let Json(request) = payload.unwrap_or_default();
        let disorder = request.disorder.as_deref().unwrap_or(UNKNOWN_DISORDER);

        Json(PredictionService::recommend(
            request.dosha.as_deref(),
            disorder,
        ))
    }
}
