//! DTOs for link shortening endpoint.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use validator::Validate;

/// Allowed characters of a caller-chosen alias. Empty means "generate one".
static ALIAS_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]*$").unwrap());

/// Request to shorten a URL.
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenRequest {
    /// The URL to shorten (must be an absolute URL).
    #[validate(url(message = "Invalid URL format"))]
    #[validate(length(max = 2048, message = "URL is too long"))]
    pub url: String,

    /// Optional custom alias. Missing or empty gets a generated one.
    #[serde(default)]
    #[validate(length(max = 32, message = "Alias must be at most 32 characters"))]
    #[validate(regex(path = "*ALIAS_REGEX", message = "Alias may contain only letters, digits, '-' and '_'"))]
    pub alias: Option<String>,
}

/// Successful shortening result.
///
/// ```json
/// { "status": "ok", "payload": "xk9P2q" }
/// ```
#[derive(Debug, Serialize)]
pub struct ShortenResponse {
    pub status: &'static str,
    pub payload: String,
}

impl ShortenResponse {
    pub fn ok(alias: String) -> Self {
        Self {
            status: "ok",
            payload: alias,
        }
    }
}
