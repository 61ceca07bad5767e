//! Cache service trait and error types.

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur during cache operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CacheError {
    #[error("cache connection error: {0}")]
    Connection(String),
    #[error("cache operation error: {0}")]
    Operation(String),
}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Volatile key/value store with per-entry expiry.
///
/// Implementations report failures honestly; it is the caller's job to treat
/// the cache as best-effort (see [`crate::application::services::LinkResolver`]).
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::RedisCache`] - Redis-backed cache
/// - [`crate::infrastructure::cache::InMemoryCache`] - process-local map with expiry
/// - [`crate::infrastructure::cache::NullCache`] - always misses
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CacheService: Send + Sync {
    /// Reads a value.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(value))` on hit
    /// - `Ok(None)` on miss or expired entry
    ///
    /// # Errors
    ///
    /// Returns [`CacheError`] if the backend cannot be reached.
    async fn get(&self, key: &str) -> CacheResult<Option<String>>;

    /// Writes a value that expires after `ttl`.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError`] if the backend cannot be reached.
    async fn set_with_ttl(&self, key: &str, value: &str, ttl: Duration) -> CacheResult<()>;

    /// Checks if the cache backend is healthy.
    async fn health_check(&self) -> bool;
}
