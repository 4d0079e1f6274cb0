// SPDX-FileCopyrightText: 2026 Revlens Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gateway HTTP server built on axum.
//!
//! Sets up routes, middleware, and shared state for the gateway.

use std::sync::Arc;

use axum::{
    Router, middleware as axum_middleware,
    routing::{get, post},
};
use revlens_analyzer::ReviewAnalyzer;
use revlens_core::RevlensError;
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;

use crate::cors::cors_middleware;
use crate::handlers;

/// Health state for the health endpoint.
#[derive(Clone)]
pub struct HealthState {
    /// Process start time for uptime calculation.
    pub start_time: std::time::Instant,
}

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct GatewayState {
    /// Review pipeline shared by all requests.
    pub analyzer: Arc<ReviewAnalyzer>,
    pub health: HealthState,
}

impl GatewayState {
    pub fn new(analyzer: Arc<ReviewAnalyzer>) -> Self {
        Self {
            analyzer,
            health: HealthState {
                start_time: std::time::Instant::now(),
            },
        }
    }
}

/// Bind address for the gateway.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Build the router with every route and middleware layer.
///
/// Routes:
/// - `GET /` index
/// - `GET /api/health`
/// - `POST|OPTIONS /api/analyze-review`
/// - `GET|OPTIONS /api/reviews`
pub fn build_router(state: GatewayState) -> Router {
    Router::new()
        .route("/", get(handlers::get_index))
        .route("/api/health", get(handlers::get_health))
        .route(
            "/api/analyze-review",
            post(handlers::post_analyze_review).options(handlers::preflight),
        )
        .route(
            "/api/reviews",
            get(handlers::get_reviews).options(handlers::preflight),
        )
        .fallback(handlers::not_found)
        .with_state(state)
        .layer(axum_middleware::from_fn(cors_middleware))
        .layer(TraceLayer::new_for_http())
}

/// Start the gateway HTTP server.
///
/// Serves until `shutdown` is cancelled, then stops accepting connections and
/// waits for in-flight requests to finish.
pub async fn start_server(
    config: &ServerConfig,
    state: GatewayState,
    shutdown: CancellationToken,
) -> Result<(), RevlensError> {
    let app = build_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| RevlensError::Internal(format!("failed to bind gateway to {addr}: {e}")))?;

    tracing::info!("Gateway server listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await
        .map_err(|e| RevlensError::Internal(format!("gateway server error: {e}")))?;

    tracing::info!("Gateway server stopped");
    Ok(())
}
