//! Repository trait definitions for the domain layer.
//!
//! These traits are the store contract the core services are written against.
//! Concrete implementations live in `crate::infrastructure::persistence`.
//!
//! # Available Repositories
//!
//! - [`LinkRepository`] - Alias to URL mappings with a unique alias
//! - [`ClickRepository`] - Click log and grouped counts
//!
//! # Testing
//!
//! Mock implementations are generated via `mockall` for unit tests. See
//! `tests/repository_*.rs` for PostgreSQL-backed usage.

pub mod click_repository;
pub mod link_repository;

pub use click_repository::ClickRepository;
pub use link_repository::LinkRepository;

#[cfg(test)]
pub use click_repository::MockClickRepository;
#[cfg(test)]
pub use link_repository::MockLinkRepository;
