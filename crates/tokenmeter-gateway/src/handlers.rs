// SPDX-FileCopyrightText: 2026 Tokenmeter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers for the gateway JSON API.
//!
//! Request bodies are validated at the boundary: malformed JSON or a missing
//! required field is answered with `400` and `{"error": ...}` before the
//! engine is called.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tokenmeter_core::UsageReport;
use tracing::{debug, error};

use crate::server::GatewayState;

/// Request body for POST /api/token-counter.
#[derive(Debug, Deserialize)]
pub struct TokenCounterRequest {
    pub prompt_text: String,
    #[serde(default)]
    pub response_text: Option<String>,
    /// Model whose encoding is used for counting. Defaults to the
    /// configured default model.
    #[serde(default)]
    pub model: Option<String>,
}

/// Request body for POST /v1/count.
#[derive(Debug, Deserialize)]
pub struct CountRequest {
    pub text: String,
    #[serde(default)]
    pub model: Option<String>,
}

/// Response body for POST /v1/count.
#[derive(Debug, Serialize)]
pub struct CountResponse {
    pub tokens: usize,
    pub model: String,
}

/// Request body for POST /v1/estimate.
#[derive(Debug, Deserialize)]
pub struct EstimateRequest {
    pub tokens_in: usize,
    pub tokens_out: usize,
    #[serde(default)]
    pub model: Option<String>,
}

/// Response body for POST /v1/estimate.
#[derive(Debug, Serialize)]
pub struct EstimateResponse {
    pub estimated_cost_usd: f64,
    pub model: String,
}

/// Response body for GET /v1/models.
#[derive(Debug, Serialize)]
pub struct ModelsResponse {
    pub default_model: String,
    pub models: Vec<ModelInfo>,
}

#[derive(Debug, Serialize)]
pub struct ModelInfo {
    pub id: String,
    pub input_per_mtok: f64,
    pub output_per_mtok: f64,
}

/// Response body for GET /health.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Health status string.
    pub status: String,
    /// Binary version.
    pub version: String,
    /// Seconds since the gateway state was created.
    pub uptime_secs: u64,
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error description.
    pub error: String,
}

/// Handler failures, rendered as `{"error": ...}`.
#[derive(Debug)]
pub enum ApiError {
    /// The request body could not be parsed.
    BadRequest(String),
    /// A blocking computation panicked or was cancelled.
    Internal(String),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            ApiError::Internal(message) => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };
        (status, Json(ErrorResponse { error })).into_response()
    }
}

/// GET /health
pub async fn get_health(State(state): State<GatewayState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
    })
}

/// POST /api/token-counter
///
/// Counts the prompt and response once and prices them for every supported
/// model.
pub async fn post_token_counter(
    State(state): State<GatewayState>,
    payload: Result<Json<TokenCounterRequest>, JsonRejection>,
) -> Result<Json<UsageReport>, ApiError> {
    let Json(body) = payload.inspect_err(log_rejection)?;
    let meter = state.meter.clone();
    let model = body
        .model
        .unwrap_or_else(|| meter.default_model().to_string());

    let report = run_blocking(move || {
        meter.build_usage_report(&body.prompt_text, body.response_text.as_deref(), &model)
    })
    .await?;
    Ok(Json(report))
}

/// POST /v1/count
pub async fn post_count(
    State(state): State<GatewayState>,
    payload: Result<Json<CountRequest>, JsonRejection>,
) -> Result<Json<CountResponse>, ApiError> {
    let Json(body) = payload.inspect_err(log_rejection)?;
    let meter = state.meter.clone();
    let model = body
        .model
        .unwrap_or_else(|| meter.default_model().to_string());

    let response = run_blocking(move || {
        let tokens = meter.count_tokens(&body.text, &model);
        CountResponse { tokens, model }
    })
    .await?;
    Ok(Json(response))
}

/// POST /v1/estimate
pub async fn post_estimate(
    State(state): State<GatewayState>,
    payload: Result<Json<EstimateRequest>, JsonRejection>,
) -> Result<Json<EstimateResponse>, ApiError> {
    let Json(body) = payload.inspect_err(log_rejection)?;
    let model = body
        .model
        .unwrap_or_else(|| state.meter.default_model().to_string());

    Ok(Json(EstimateResponse {
        estimated_cost_usd: state
            .meter
            .estimate_cost(body.tokens_in, body.tokens_out, &model),
        model,
    }))
}

/// GET /v1/models
pub async fn get_models(State(state): State<GatewayState>) -> Json<ModelsResponse> {
    let pricing = state.meter.pricing();
    Json(ModelsResponse {
        default_model: pricing.default_model().to_string(),
        models: pricing
            .entries()
            .map(|(id, price)| ModelInfo {
                id: id.to_string(),
                input_per_mtok: price.input_per_mtok,
                output_per_mtok: price.output_per_mtok,
            })
            .collect(),
    })
}

/// Tokenizing large texts is CPU-bound; keep it off the reactor threads.
async fn run_blocking<T, F>(work: F) -> Result<T, ApiError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work).await.map_err(|e| {
        error!(error = %e, "blocking task failed");
        ApiError::Internal("internal error".to_string())
    })
}

fn log_rejection(rejection: &JsonRejection) {
    debug!(status = %rejection.status(), reason = %rejection.body_text(), "rejected request body");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bad_request_renders_400() {
        let response = ApiError::BadRequest("missing field `prompt_text`".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn internal_renders_500() {
        let response = ApiError::Internal("boom".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn token_counter_request_defaults_optional_fields() {
        let body: TokenCounterRequest =
            serde_json::from_str(r#"{"prompt_text": "hi"}"#).unwrap();
        assert_eq!(body.prompt_text, "hi");
        assert!(body.response_text.is_none());
        assert!(body.model.is_none());
    }

    #[test]
    fn null_response_text_is_absent() {
        let body: TokenCounterRequest =
            serde_json::from_str(r#"{"prompt_text": "hi", "response_text": null}"#).unwrap();
        assert!(body.response_text.is_none());
    }
}
