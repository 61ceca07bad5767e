//! Handler for link shortening endpoint.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use serde_json::json;
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Binds a URL to a new alias.
///
/// # Endpoint
///
/// `POST /api/shorten`
///
/// # Request Body
///
/// ```json
/// {
///   "url": "https://example.com",
///   "alias": "my-link"  // optional
/// }
/// ```
///
/// # Response
///
/// `201 Created` with `{"status": "ok", "payload": "<alias>"}`.
///
/// # Errors
///
/// - 400 Bad Request if the body is malformed or fails validation
/// - 409 Conflict if the alias is taken or no free alias was found
/// - 503 Service Unavailable on store failure
pub async fn shorten_handler(
    State(state): State<AppState>,
    payload: Result<Json<ShortenRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ShortenResponse>), AppError> {
    let Json(payload) = payload.map_err(|rejection| {
        AppError::bad_request(
            "invalid request body",
            json!({ "reason": rejection.body_text() }),
        )
    })?;
    payload.validate()?;

    let alias = state
        .allocator
        .allocate(&payload.url, payload.alias.as_deref())
        .await?;

    tracing::info!(alias = %alias, "link created");

    Ok((StatusCode::CREATED, Json(ShortenResponse::ok(alias))))
}
