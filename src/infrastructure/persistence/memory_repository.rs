//! In-memory repositories.
//!
//! Same contracts as the PostgreSQL repositories, without durability. Used by
//! the test suite and for running the service without a database.

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::collections::BTreeMap;

use crate::domain::entities::{Click, ClickCount, Link, NewClick, NewLink};
use crate::domain::repositories::{ClickRepository, LinkRepository};
use crate::error::StoreError;

/// Alias mappings held in a sharded map.
///
/// The map entry API gives the same check-and-insert atomicity the unique
/// index gives in PostgreSQL.
#[derive(Debug, Default)]
pub struct InMemoryLinkRepository {
    links: DashMap<String, Link>,
}

impl InMemoryLinkRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the stored link for `alias`, if any.
    pub fn get(&self, alias: &str) -> Option<Link> {
        self.links.get(alias).map(|link| link.value().clone())
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

#[async_trait]
impl LinkRepository for InMemoryLinkRepository {
    async fn insert_link(&self, new_link: NewLink) -> Result<String, StoreError> {
        match self.links.entry(new_link.alias.clone()) {
            Entry::Occupied(_) => Err(StoreError::DuplicateKey),
            Entry::Vacant(slot) => {
                let alias = new_link.alias.clone();
                slot.insert(Link::new(
                    new_link.id,
                    new_link.url,
                    new_link.alias,
                    Utc::now(),
                ));
                Ok(alias)
            }
        }
    }

    async fn find_url(&self, alias: &str) -> Result<String, StoreError> {
        self.links
            .get(alias)
            .map(|link| link.url.clone())
            .ok_or(StoreError::NotFound)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

/// Click log partitioned by alias.
#[derive(Debug, Default)]
pub struct InMemoryClickRepository {
    clicks: DashMap<String, Vec<Click>>,
}

impl InMemoryClickRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// All clicks recorded for `alias`, oldest insert first.
    pub fn clicks_for(&self, alias: &str) -> Vec<Click> {
        self.clicks
            .get(alias)
            .map(|clicks| clicks.value().clone())
            .unwrap_or_default()
    }

    fn count_by<F>(&self, alias: &str, key: F) -> BTreeMap<String, i64>
    where
        F: Fn(&Click) -> String,
    {
        let mut counts = BTreeMap::new();
        if let Some(clicks) = self.clicks.get(alias) {
            for click in clicks.iter() {
                *counts.entry(key(click)).or_insert(0) += 1;
            }
        }
        counts
    }
}

#[async_trait]
impl ClickRepository for InMemoryClickRepository {
    async fn insert_click(&self, new_click: NewClick) -> Result<Click, StoreError> {
        let click = new_click.into_click();
        self.clicks
            .entry(click.alias.clone())
            .or_default()
            .push(click.clone());
        Ok(click)
    }

    async fn clicks_by_day(&self, alias: &str) -> Result<Vec<ClickCount>, StoreError> {
        Ok(self
            .count_by(alias, |c| c.clicked_at.format("%Y-%m-%d").to_string())
            .into_iter()
            .map(|(key, clicks)| ClickCount::new(key, clicks))
            .collect())
    }

    async fn clicks_by_month(&self, alias: &str) -> Result<Vec<ClickCount>, StoreError> {
        Ok(self
            .count_by(alias, |c| c.clicked_at.format("%Y-%m").to_string())
            .into_iter()
            .map(|(key, clicks)| ClickCount::new(key, clicks))
            .collect())
    }

    async fn clicks_by_client(&self, alias: &str) -> Result<Vec<ClickCount>, StoreError> {
        let mut counts: Vec<ClickCount> = self
            .count_by(alias, |c| c.client_name.clone())
            .into_iter()
            .map(|(key, clicks)| ClickCount::new(key, clicks))
            .collect();
        // BTreeMap already yields names ascending; a stable sort keeps that
        // order among equal counts.
        counts.sort_by(|a, b| b.clicks.cmp(&a.clicks));
        Ok(counts)
    }
}
