//! Handler for alias redirect.

use axum::{
    extract::{ConnectInfo, Path, State},
    http::{HeaderMap, StatusCode, header},
    response::IntoResponse,
};
use std::net::SocketAddr;
use tokio::sync::mpsc::error::TrySendError;
use tracing::warn;

use crate::domain::click_event::ClickEvent;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::client_ip::extract_client_ip;

/// Redirects an alias to its URL.
///
/// # Endpoint
///
/// `GET /api/s/{alias}`
///
/// # Request Flow
///
/// 1. Resolve the alias (cache first, then store)
/// 2. Offer a click event to the background worker
/// 3. Return 302 Found
///
/// # Click Tracking
///
/// The event goes into a bounded channel without waiting. If the queue is
/// full or closed the click is dropped and counted in
/// `clicks_dropped_total`; the redirect is unaffected.
///
/// # Errors
///
/// Returns 404 Not Found if the alias doesn't exist.
/// Returns 503 Service Unavailable if the store cannot be reached.
pub async fn redirect_handler(
    Path(alias): Path<String>,
    State(state): State<AppState>,
    headers: HeaderMap,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
) -> Result<impl IntoResponse, AppError> {
    let url = state.resolver.resolve(&alias).await?;

    let ip = extract_client_ip(&headers, &state.trusted_proxy_headers, addr);
    let user_agent = headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok());

    if let Err(e) = state
        .click_sender
        .try_send(ClickEvent::new(alias, user_agent, ip))
    {
        metrics::counter!("clicks_dropped_total").increment(1);
        let (reason, event) = match e {
            TrySendError::Full(event) => ("queue full", event),
            TrySendError::Closed(event) => ("queue closed", event),
        };
        warn!(alias = %event.alias, reason, "click dropped");
    }

    Ok((StatusCode::FOUND, [(header::LOCATION, url)]))
}
