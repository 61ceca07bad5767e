//! Error types shared by the store, the core services and the HTTP boundary.
//!
//! Two layers:
//!
//! - [`StoreError`] - the tagged outcome a repository reports. Services decide
//!   what a duplicate key or a missing row means on their path.
//! - [`AppError`] - what a core operation returns. Implements [`IntoResponse`]
//!   so handlers can use `?` directly.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};
use thiserror::Error;

use crate::infrastructure::cache::CacheError;

/// Tagged failure reported by a repository.
///
/// Replaces inspecting driver errors at the call site: the persistence layer
/// classifies once, services match on the variant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// A uniqueness constraint rejected the write.
    #[error("duplicate key")]
    DuplicateKey,
    /// The requested row does not exist.
    #[error("record not found")]
    NotFound,
    /// Any other failure: connection loss, timeout, malformed row.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Why an allocation ended in a conflict.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConflictCause {
    /// The caller asked for an alias that is already taken.
    #[error("alias `{alias}` is already taken")]
    Taken { alias: String },
    /// Every generated alias collided within the retry budget.
    #[error("no free alias found after {attempts} attempts")]
    Exhausted { attempts: u32 },
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("alias already exists: {0}")]
    AliasAlreadyExists(ConflictCause),

    #[error("alias `{alias}` not found")]
    AliasNotFound { alias: String },

    #[error("store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("cache unavailable: {0}")]
    CacheUnavailable(String),

    #[error("{message}")]
    Validation { message: String, details: Value },
}

#[derive(Serialize)]
struct ErrorBody {
    status: &'static str,
    error: ErrorInfo,
}

/// Machine-readable error payload returned to HTTP clients.
#[derive(Debug, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }

    pub fn not_found(alias: impl Into<String>) -> Self {
        Self::AliasNotFound {
            alias: alias.into(),
        }
    }

    /// Returns true for conflicts on either allocation path.
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::AliasAlreadyExists(_))
    }

    /// Returns true for infrastructure failures a client may retry.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::StoreUnavailable(_) | Self::CacheUnavailable(_))
    }

    fn status_code(&self) -> StatusCode {
        match self {
            Self::AliasAlreadyExists(_) => StatusCode::CONFLICT,
            Self::AliasNotFound { .. } => StatusCode::NOT_FOUND,
            Self::StoreUnavailable(_) | Self::CacheUnavailable(_) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
        }
    }

    /// Builds the client-facing payload.
    ///
    /// Infrastructure details stay in the logs; clients get a generic message.
    pub fn to_error_info(&self) -> ErrorInfo {
        match self {
            Self::AliasAlreadyExists(cause) => ErrorInfo {
                code: "conflict",
                message: "url with such alias already exists".to_string(),
                details: match cause {
                    ConflictCause::Taken { alias } => json!({ "alias": alias }),
                    ConflictCause::Exhausted { attempts } => json!({ "attempts": attempts }),
                },
            },
            Self::AliasNotFound { alias } => ErrorInfo {
                code: "not_found",
                message: "alias not found".to_string(),
                details: json!({ "alias": alias }),
            },
            Self::StoreUnavailable(_) | Self::CacheUnavailable(_) => ErrorInfo {
                code: "unavailable",
                message: "internal server error, try again later".to_string(),
                details: json!({}),
            },
            Self::Validation { message, details } => ErrorInfo {
                code: "validation_error",
                message: message.clone(),
                details: details.clone(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.is_retryable() {
            tracing::error!(error = %self, "request failed on infrastructure error");
        }

        let body = ErrorBody {
            status: "error",
            error: self.to_error_info(),
        };

        (self.status_code(), Json(body)).into_response()
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let details = serde_json::to_value(&errors).unwrap_or_else(|_| json!({}));
        AppError::bad_request("validation error", details)
    }
}

impl From<CacheError> for AppError {
    fn from(e: CacheError) -> Self {
        AppError::CacheUnavailable(e.to_string())
    }
}
