//! Cache-aside alias resolution.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::domain::repositories::LinkRepository;
use crate::error::{AppError, StoreError};
use crate::infrastructure::cache::CacheService;

/// How long a resolved mapping stays in the cache.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Resolves aliases through the cache, falling back to the store.
///
/// The cache is best-effort: its errors are logged and treated as a miss, and
/// it is never the sole source of a "not found".
pub struct LinkResolver<L: LinkRepository + ?Sized> {
    link_repository: Arc<L>,
    cache: Arc<dyn CacheService>,
    cache_ttl: Duration,
}

impl<L: LinkRepository + ?Sized> LinkResolver<L> {
    /// Creates a new resolver.
    pub fn new(link_repository: Arc<L>, cache: Arc<dyn CacheService>, cache_ttl: Duration) -> Self {
        Self {
            link_repository,
            cache,
            cache_ttl,
        }
    }

    /// Returns the URL stored under `alias`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::AliasNotFound`] if the store has no such alias.
    /// Returns [`AppError::StoreUnavailable`] if the store lookup fails.
    pub async fn resolve(&self, alias: &str) -> Result<String, AppError> {
        match self.cache.get(alias).await {
            Ok(Some(url)) => {
                debug!(alias, "cache hit");
                return Ok(url);
            }
            Ok(None) => debug!(alias, "cache miss"),
            Err(e) => {
                let err = AppError::from(e);
                warn!(alias, error = %err, "cache read failed, falling back to store");
            }
        }

        let url = self
            .link_repository
            .find_url(alias)
            .await
            .map_err(|e| match e {
                StoreError::NotFound => AppError::not_found(alias),
                other => AppError::StoreUnavailable(other.to_string()),
            })?;

        if let Err(e) = self.cache.set_with_ttl(alias, &url, self.cache_ttl).await {
            let err = AppError::from(e);
            warn!(alias, error = %err, "cache write failed");
        }

        Ok(url)
    }
}
