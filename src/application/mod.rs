//! Application layer services implementing business logic.
//!
//! Services are written against the repository and cache traits and receive
//! their collaborators through constructors. Handlers call them directly.
//!
//! # Available Services
//!
//! - [`services::AliasAllocator`] - Collision-safe alias allocation
//! - [`services::LinkResolver`] - Cache-aside alias resolution
//! - [`services::ClickAggregator`] - Click recording and summaries
//!
//! [`retry`] holds the bounded retry state machine the allocator drives.

pub mod retry;
pub mod services;
