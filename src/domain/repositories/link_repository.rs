//! Repository trait for alias mappings.

use crate::domain::entities::NewLink;
use crate::error::StoreError;
use async_trait::async_trait;

/// Durable alias to URL storage.
///
/// The unique index on `alias` is the only uniqueness guard in the system;
/// implementations must report a violation as [`StoreError::DuplicateKey`]
/// and never overwrite an existing row.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::InMemoryLinkRepository`] - process-local map
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Inserts a new link and returns the alias that was stored.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DuplicateKey`] if the alias already exists.
    /// Returns [`StoreError::Unavailable`] on any other failure.
    async fn insert_link(&self, new_link: NewLink) -> Result<String, StoreError>;

    /// Looks up the URL stored under `alias`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no link has this alias.
    /// Returns [`StoreError::Unavailable`] on any other failure.
    async fn find_url(&self, alias: &str) -> Result<String, StoreError>;

    /// Cheap round trip used by the health endpoint.
    async fn ping(&self) -> Result<(), StoreError>;
}
