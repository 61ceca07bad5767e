//! Link entity representing an alias to URL mapping.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A stored alias mapping.
///
/// The `(alias, url)` pair never changes once the row exists, which is what
/// makes a time-bounded cache copy safe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub id: Uuid,
    pub url: String,
    pub alias: String,
    pub created_at: DateTime<Utc>,
}

impl Link {
    /// Creates a new Link instance.
    pub fn new(id: Uuid, url: String, alias: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            url,
            alias,
            created_at,
        }
    }
}

/// Input data for inserting a new link.
///
/// The identifier is assigned here rather than by the database so every
/// attempt of a retried allocation carries a fresh one.
#[derive(Debug, Clone)]
pub struct NewLink {
    pub id: Uuid,
    pub url: String,
    pub alias: String,
}

impl NewLink {
    pub fn new(url: impl Into<String>, alias: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            url: url.into(),
            alias: alias.into(),
        }
    }
}
