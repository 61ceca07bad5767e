//! Process-local cache with per-entry expiry.

use super::service::{CacheResult, CacheService};
use async_trait::async_trait;
use dashmap::DashMap;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
struct Entry {
    value: String,
    expires_at: Instant,
}

impl Entry {
    fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// In-memory [`CacheService`] backed by a sharded map.
///
/// Expired entries are dropped lazily on read. Suitable for a single
/// process and for tests; it never fails.
#[derive(Debug, Default)]
pub struct InMemoryCache {
    entries: DashMap<String, Entry>,
}

impl InMemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Time left before `key` expires, `None` if absent or already expired.
    pub fn ttl_remaining(&self, key: &str) -> Option<Duration> {
        let now = Instant::now();
        self.entries
            .get(key)
            .filter(|entry| !entry.is_expired(now))
            .map(|entry| entry.expires_at - now)
    }

    /// Number of stored entries, including ones that expired but were not read yet.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl CacheService for InMemoryCache {
    async fn get(&self, key: &str) -> CacheResult<Option<String>> {
        let now = Instant::now();
        // The read guard must be gone before remove_if takes the shard lock.
        let hit = self.entries.get(key).map(|entry| entry.value().clone());

        match hit {
            Some(entry) if !entry.is_expired(now) => Ok(Some(entry.value)),
            Some(_) => {
                self.entries.remove_if(key, |_, entry| entry.is_expired(now));
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn set_with_ttl(&self, key: &str, value: &str, ttl: Duration) -> CacheResult<()> {
        self.entries.insert(
            key.to_string(),
            Entry {
                value: value.to_string(),
                expires_at: Instant::now() + ttl,
            },
        );
        Ok(())
    }

    async fn health_check(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_then_get() {
        let cache = InMemoryCache::new();
        cache
            .set_with_ttl("xyz", "https://a.com", Duration::from_secs(3600))
            .await
            .unwrap();

        assert_eq!(cache.get("xyz").await.unwrap().as_deref(), Some("https://a.com"));
        let ttl = cache.ttl_remaining("xyz").unwrap();
        assert!(ttl > Duration::from_secs(3590));
    }

    #[tokio::test]
    async fn test_expired_entry_is_a_miss() {
        let cache = InMemoryCache::new();
        cache
            .set_with_ttl("old", "https://a.com", Duration::ZERO)
            .await
            .unwrap();

        assert_eq!(cache.get("old").await.unwrap(), None);
        assert!(cache.ttl_remaining("old").is_none());
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn test_missing_key() {
        let cache = InMemoryCache::new();
        assert_eq!(cache.get("nope").await.unwrap(), None);
        assert!(cache.health_check().await);
    }
}
