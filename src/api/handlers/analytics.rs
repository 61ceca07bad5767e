//! Handler for click analytics.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::analytics::AnalyticsResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Returns click counts for an alias grouped by day, month and client.
///
/// # Endpoint
///
/// `GET /api/analytics/{alias}`
///
/// An alias without clicks, including one that was never created, returns
/// three empty lists.
///
/// # Errors
///
/// Returns 503 Service Unavailable if any grouping query fails.
pub async fn analytics_handler(
    Path(alias): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<AnalyticsResponse>, AppError> {
    let summary = state.aggregator.summarize(&alias).await?;
    Ok(Json(summary.into()))
}
