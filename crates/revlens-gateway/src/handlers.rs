// SPDX-FileCopyrightText: 2026 Revlens Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers for the review API.
//!
//! Handles POST /api/analyze-review, GET /api/reviews, GET /api/health, GET /.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use revlens_analyzer::ReviewListing;
use revlens_core::types::{HealthStatus, Review};

use crate::error::{ApiError, ErrorResponse};
use crate::server::GatewayState;

pub const NO_JSON_DATA: &str = "No JSON data provided";
pub const ANALYZED_MESSAGE: &str = "Review analyzed successfully";

/// Request body for POST /api/analyze-review.
#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    /// Raw review text. Anything other than a JSON string counts as missing.
    #[serde(default)]
    pub review_text: Option<serde_json::Value>,
}

/// Response body for POST /api/analyze-review: the stored review plus a message.
#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    #[serde(flatten)]
    pub review: Review,
    pub message: &'static str,
}

/// Response body for GET /api/health.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// `healthy` or `degraded`.
    pub status: &'static str,
    pub service: &'static str,
    /// `connected` or `unavailable`.
    pub database: &'static str,
    /// `loaded`, `not configured` or `unavailable`.
    pub sentiment_analyzer: &'static str,
    /// Same values as `sentiment_analyzer`.
    pub gemini_api: &'static str,
    pub version: &'static str,
    pub uptime_secs: u64,
}

/// POST /api/analyze-review
///
/// Analyzes a review and returns the stored record with status 201.
pub async fn post_analyze_review(
    State(state): State<GatewayState>,
    body: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(body) = match body {
        Ok(body) => body,
        Err(rejection) => {
            debug!(reason = %rejection.body_text(), "rejected analyze request body");
            return Ok((
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new(NO_JSON_DATA)),
            )
                .into_response());
        }
    };

    let text = body.review_text.as_ref().and_then(|v| v.as_str());
    let review = state.analyzer.analyze(text).await?;

    Ok((
        StatusCode::CREATED,
        Json(AnalyzeResponse {
            review,
            message: ANALYZED_MESSAGE,
        }),
    )
        .into_response())
}

/// GET /api/reviews
///
/// Returns every stored review, newest first, with the count.
pub async fn get_reviews(
    State(state): State<GatewayState>,
) -> Result<Json<ReviewListing>, ApiError> {
    Ok(Json(state.analyzer.list_reviews().await?))
}

/// OPTIONS pre-flight: empty 200. CORS headers are added by middleware.
pub async fn preflight() -> StatusCode {
    StatusCode::OK
}

/// GET /api/health
///
/// Reports each adapter's health check. Returns 503 when the store is
/// unreachable; collaborator status does not affect the code.
pub async fn get_health(State(state): State<GatewayState>) -> Response {
    let health = state.analyzer.health().await;
    let database_ok = matches!(health.database, HealthStatus::Healthy);

    let body = HealthResponse {
        status: if database_ok { "healthy" } else { "degraded" },
        service: "Product Review Analyzer",
        database: if database_ok { "connected" } else { "unavailable" },
        sentiment_analyzer: collaborator_label(&health.classifier),
        gemini_api: collaborator_label(&health.extractor),
        version: env!("CARGO_PKG_VERSION"),
        uptime_secs: state.health.start_time.elapsed().as_secs(),
    };

    let status = if database_ok {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, Json(body)).into_response()
}

fn collaborator_label(status: &HealthStatus) -> &'static str {
    match status {
        HealthStatus::Healthy => "loaded",
        HealthStatus::Degraded(_) => "not configured",
        HealthStatus::Unhealthy(_) => "unavailable",
    }
}

/// Fallback for unmatched paths.
pub async fn not_found() -> (StatusCode, Json<ErrorResponse>) {
    (StatusCode::NOT_FOUND, Json(ErrorResponse::new("Not found")))
}

/// GET /
///
/// Lists the available endpoints.
pub async fn get_index() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "message": "Product Review Analyzer API",
        "endpoints": {
            "POST /api/analyze-review": "Analyze a new product review",
            "GET /api/reviews": "Get all analyzed reviews",
            "GET /api/health": "Health check",
        },
    }))
}
