//! Shared application state injected into all handlers.

use std::sync::Arc;
use std::time::Duration;

use axum::http::HeaderName;
use tokio::sync::mpsc;

use crate::application::retry::RetryPolicy;
use crate::application::services::{AliasAllocator, ClickAggregator, DEFAULT_CACHE_TTL, LinkResolver};
use crate::config::Config;
use crate::domain::click_event::ClickEvent;
use crate::domain::repositories::{ClickRepository, LinkRepository};
use crate::infrastructure::cache::CacheService;
use crate::utils::alias_generator::{AliasGenerator, DEFAULT_ALIAS_LENGTH};

/// Tunables of the core services.
#[derive(Debug, Clone)]
pub struct CoreSettings {
    pub alias_length: usize,
    pub retry_policy: RetryPolicy,
    pub cache_ttl: Duration,
    pub trusted_proxy_headers: Vec<HeaderName>,
}

impl Default for CoreSettings {
    fn default() -> Self {
        Self {
            alias_length: DEFAULT_ALIAS_LENGTH,
            retry_policy: RetryPolicy::default(),
            cache_ttl: DEFAULT_CACHE_TTL,
            trusted_proxy_headers: vec![HeaderName::from_static("x-real-ip")],
        }
    }
}

impl From<&Config> for CoreSettings {
    /// Header names that fail to parse are skipped; [`Config::validate`]
    /// rejects them first.
    fn from(config: &Config) -> Self {
        Self {
            alias_length: config.alias_length,
            retry_policy: RetryPolicy::new(
                config.alias_retry_attempts,
                Duration::from_millis(config.alias_retry_base_delay_ms),
                config.alias_retry_multiplier,
            )
            .with_max_delay(Duration::from_millis(config.alias_retry_max_delay_ms)),
            cache_ttl: Duration::from_secs(config.cache_ttl_seconds),
            trusted_proxy_headers: config
                .trusted_proxy_headers
                .iter()
                .filter_map(|h| HeaderName::try_from(h.as_str()).ok())
                .collect(),
        }
    }
}

/// Global application state shared across all request handlers.
///
/// Cloning is cheap; every field is reference-counted or a channel handle.
#[derive(Clone)]
pub struct AppState {
    pub allocator: Arc<AliasAllocator<dyn LinkRepository>>,
    pub resolver: Arc<LinkResolver<dyn LinkRepository>>,
    pub aggregator: Arc<ClickAggregator<dyn ClickRepository>>,
    /// Direct store handle for health checks.
    pub link_store: Arc<dyn LinkRepository>,
    pub cache: Arc<dyn CacheService>,
    pub click_sender: mpsc::Sender<ClickEvent>,
    pub trusted_proxy_headers: Arc<[HeaderName]>,
}

impl AppState {
    /// Wires the core services around the given store and cache.
    pub fn new(
        link_store: Arc<dyn LinkRepository>,
        click_store: Arc<dyn ClickRepository>,
        cache: Arc<dyn CacheService>,
        click_sender: mpsc::Sender<ClickEvent>,
        settings: CoreSettings,
    ) -> Self {
        let allocator = AliasAllocator::new(
            link_store.clone(),
            AliasGenerator::new(settings.alias_length),
            settings.retry_policy,
        );
        let resolver = LinkResolver::new(link_store.clone(), cache.clone(), settings.cache_ttl);
        let aggregator = ClickAggregator::new(click_store);

        Self {
            allocator: Arc::new(allocator),
            resolver: Arc::new(resolver),
            aggregator: Arc::new(aggregator),
            link_store,
            cache,
            click_sender,
            trusted_proxy_headers: settings.trusted_proxy_headers.into(),
        }
    }
}
