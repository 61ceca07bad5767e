//! API route configuration.

use crate::api::handlers::{analytics_handler, redirect_handler, shorten_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Routes mounted under `/api`.
///
/// # Endpoints
///
/// - `POST /shorten`            - Bind a URL to a custom or generated alias
/// - `GET  /s/{alias}`          - Redirect to the aliased URL
/// - `GET  /analytics/{alias}`  - Click counts by day, month and client
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/shorten", post(shorten_handler))
        .route("/s/{alias}", get(redirect_handler))
        .route("/analytics/{alias}", get(analytics_handler))
}
