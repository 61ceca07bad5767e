//! PostgreSQL implementation of the click repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use super::db_error::classify;
use crate::domain::entities::{Click, ClickCount, NewClick};
use crate::domain::repositories::ClickRepository;
use crate::error::StoreError;

#[derive(sqlx::FromRow)]
struct ClickCountRow {
    key: String,
    clicks: i64,
}

impl From<ClickCountRow> for ClickCount {
    fn from(row: ClickCountRow) -> Self {
        ClickCount::new(row.key, row.clicks)
    }
}

/// PostgreSQL repository for the click log.
///
/// Day and month buckets are computed in UTC so the result does not depend
/// on the session time zone.
pub struct PgClickRepository {
    pool: Arc<PgPool>,
}

impl PgClickRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    async fn grouped(&self, sql: &'static str, alias: &str) -> Result<Vec<ClickCount>, StoreError> {
        let rows = sqlx::query_as::<_, ClickCountRow>(sql)
            .bind(alias)
            .fetch_all(self.pool.as_ref())
            .await
            .map_err(classify)?;

        Ok(rows.into_iter().map(ClickCount::from).collect())
    }
}

#[async_trait]
impl ClickRepository for PgClickRepository {
    async fn insert_click(&self, new_click: NewClick) -> Result<Click, StoreError> {
        sqlx::query(
            r#"
            INSERT INTO clicks (id, alias, user_agent, client_name, device_type, ip, clicked_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(new_click.id)
        .bind(&new_click.alias)
        .bind(&new_click.user_agent)
        .bind(&new_click.client_name)
        .bind(new_click.device_type.as_str())
        .bind(&new_click.ip)
        .bind(new_click.clicked_at)
        .execute(self.pool.as_ref())
        .await
        .map_err(classify)?;

        Ok(new_click.into_click())
    }

    async fn clicks_by_day(&self, alias: &str) -> Result<Vec<ClickCount>, StoreError> {
        self.grouped(
            r#"
            SELECT to_char(clicked_at AT TIME ZONE 'UTC', 'YYYY-MM-DD') AS key,
                   COUNT(*) AS clicks
            FROM clicks
            WHERE alias = $1
            GROUP BY key
            ORDER BY key ASC
            "#,
            alias,
        )
        .await
    }

    async fn clicks_by_month(&self, alias: &str) -> Result<Vec<ClickCount>, StoreError> {
        self.grouped(
            r#"
            SELECT to_char(clicked_at AT TIME ZONE 'UTC', 'YYYY-MM') AS key,
                   COUNT(*) AS clicks
            FROM clicks
            WHERE alias = $1
            GROUP BY key
            ORDER BY key ASC
            "#,
            alias,
        )
        .await
    }

    async fn clicks_by_client(&self, alias: &str) -> Result<Vec<ClickCount>, StoreError> {
        self.grouped(
            r#"
            SELECT client_name AS key,
                   COUNT(*) AS clicks
            FROM clicks
            WHERE alias = $1
            GROUP BY client_name
            ORDER BY clicks DESC, key ASC
            "#,
            alias,
        )
        .await
    }
}
