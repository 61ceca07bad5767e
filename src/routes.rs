//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /health`  - Health check: DB, cache, click queue
//! - `/api/*`        - Shorten, redirect and analytics
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Timeout** - Fixed per-request deadline, 504 when exceeded
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::health_handler;
use crate::api::middleware::{timeout, tracing};
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use std::time::Duration;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `request_timeout` - deadline applied to every request
pub fn app_router(state: AppState, request_timeout: Duration) -> NormalizePath<Router> {
    let router = Router::new()
        .route("/health", get(health_handler))
        .nest("/api", api::routes::api_routes())
        .with_state(state)
        .layer(timeout::layer(request_timeout))
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
