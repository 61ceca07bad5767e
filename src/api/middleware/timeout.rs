//! Per-request deadline.

use axum::http::StatusCode;
use std::time::Duration;
use tower_http::timeout::TimeoutLayer;

/// Default request deadline.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_millis(2_000);

/// Answers `504 Gateway Timeout` when a request runs past `deadline`.
///
/// The handler future is dropped at the deadline, which cancels any store or
/// cache call still in flight. A click already handed to the worker is not
/// affected.
pub fn layer(deadline: Duration) -> TimeoutLayer {
    TimeoutLayer::with_status_code(StatusCode::GATEWAY_TIMEOUT, deadline)
}
