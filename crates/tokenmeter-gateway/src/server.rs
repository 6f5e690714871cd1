// SPDX-FileCopyrightText: 2026 Tokenmeter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gateway HTTP server built on axum.
//!
//! Sets up routes, middleware, and shared state for the gateway.

use std::time::Instant;

use axum::{
    Router,
    routing::{get, post},
};
use tokenmeter_core::TokenmeterError;
use tokenmeter_cost::TokenMeter;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::handlers;

/// Shared state for axum request handlers.
#[derive(Debug, Clone)]
pub struct GatewayState {
    /// The engine every endpoint calls into.
    pub meter: TokenMeter,
    /// Process start time for uptime calculation.
    pub start_time: Instant,
}

impl GatewayState {
    pub fn new(meter: TokenMeter) -> Self {
        Self {
            meter,
            start_time: Instant::now(),
        }
    }
}

/// Gateway server bind settings.
///
/// Mirrors `[server]` from `tokenmeter-config` so the gateway does not depend
/// on the config crate.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host address to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
}

/// Build the application router.
///
/// Routes:
/// - GET /health
/// - POST /api/token-counter
/// - POST /v1/count
/// - POST /v1/estimate
/// - GET /v1/models
pub fn build_router(state: GatewayState) -> Router {
    Router::new()
        .route("/health", get(handlers::get_health))
        .route("/api/token-counter", post(handlers::post_token_counter))
        .route("/v1/count", post(handlers::post_count))
        .route("/v1/estimate", post(handlers::post_estimate))
        .route("/v1/models", get(handlers::get_models))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Bind to `host:port` and serve until SIGINT or SIGTERM.
pub async fn start_server(config: &ServerConfig, state: GatewayState) -> Result<(), TokenmeterError> {
    let app = build_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| TokenmeterError::Server {
            message: format!("failed to bind gateway to {addr}: {e}"),
            source: Some(Box::new(e)),
        })?;

    info!("tokenmeter listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| TokenmeterError::Server {
            message: format!("gateway server error: {e}"),
            source: Some(Box::new(e)),
        })?;

    info!("tokenmeter shutdown complete");
    Ok(())
}

/// Resolves on Ctrl+C, or on SIGTERM for unix targets.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("received SIGINT (Ctrl+C), initiating shutdown"),
        _ = terminate => info!("received SIGTERM, initiating shutdown"),
    }
}
