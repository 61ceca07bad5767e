//! Repository trait for the click log and its aggregates.

use crate::domain::entities::{Click, ClickCount, NewClick};
use crate::error::StoreError;
use async_trait::async_trait;

/// Append-only click storage with grouped counts.
///
/// Every aggregate is keyed by alias and returns an empty vector, not an
/// error, when the alias has no clicks.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgClickRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::InMemoryClickRepository`] - process-local log
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClickRepository: Send + Sync {
    /// Appends one click event.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] if the write fails.
    async fn insert_click(&self, new_click: NewClick) -> Result<Click, StoreError>;

    /// Click counts per UTC calendar day (`YYYY-MM-DD`), oldest first.
    async fn clicks_by_day(&self, alias: &str) -> Result<Vec<ClickCount>, StoreError>;

    /// Click counts per UTC calendar month (`YYYY-MM`), oldest first.
    async fn clicks_by_month(&self, alias: &str) -> Result<Vec<ClickCount>, StoreError>;

    /// Click counts per client name, highest count first.
    ///
    /// Ties are ordered by client name so results are stable.
    async fn clicks_by_client(&self, alias: &str) -> Result<Vec<ClickCount>, StoreError>;
}
