//! Core services: allocation, resolution and click analytics.

pub mod alias_allocator;
pub mod click_aggregator;
pub mod link_resolver;

pub use alias_allocator::AliasAllocator;
pub use click_aggregator::ClickAggregator;
pub use link_resolver::{DEFAULT_CACHE_TTL, LinkResolver};
