//! PostgreSQL implementation of link repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;
use tracing::error;

use super::db_error::classify;
use crate::domain::entities::NewLink;
use crate::domain::repositories::LinkRepository;
use crate::error::StoreError;

/// PostgreSQL repository for alias mappings.
///
/// A single `INSERT ... RETURNING` is the whole write path; the
/// `links_alias_key` constraint decides races between concurrent allocations.
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
}

impl PgLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn insert_link(&self, new_link: NewLink) -> Result<String, StoreError> {
        sqlx::query_scalar::<_, String>(
            r#"
            INSERT INTO links (id, url, alias)
            VALUES ($1, $2, $3)
            RETURNING alias
            "#,
        )
        .bind(new_link.id)
        .bind(&new_link.url)
        .bind(&new_link.alias)
        .fetch_one(self.pool.as_ref())
        .await
        .map_err(|e| {
            let err = classify(e);
            if !matches!(err, StoreError::DuplicateKey) {
                error!(alias = %new_link.alias, error = %err, "failed to insert link");
            }
            err
        })
    }

    async fn find_url(&self, alias: &str) -> Result<String, StoreError> {
        let url = sqlx::query_scalar::<_, String>(
            r#"
            SELECT url
            FROM links
            WHERE alias = $1
            LIMIT 1
            "#,
        )
        .bind(alias)
        .fetch_optional(self.pool.as_ref())
        .await
        .map_err(|e| {
            error!(alias, error = %e, "failed to look up alias");
            classify(e)
        })?;

        url.ok_or(StoreError::NotFound)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1")
            .execute(self.pool.as_ref())
            .await
            .map(|_| ())
            .map_err(classify)
    }
}
