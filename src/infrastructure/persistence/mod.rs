//! Repository implementations.
//!
//! PostgreSQL repositories use SQLx with bound parameters; the in-memory ones
//! implement the same traits for tests and database-less runs.
//!
//! # Repositories
//!
//! - [`PgLinkRepository`] / [`InMemoryLinkRepository`] - Alias mappings
//! - [`PgClickRepository`] / [`InMemoryClickRepository`] - Click log and aggregates

pub mod db_error;
pub mod memory_repository;
pub mod pg_click_repository;
pub mod pg_link_repository;

pub use memory_repository::{InMemoryClickRepository, InMemoryLinkRepository};
pub use pg_click_repository::PgClickRepository;
pub use pg_link_repository::PgLinkRepository;
