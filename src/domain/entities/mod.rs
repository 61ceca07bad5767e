//! Core domain entities representing the business data model.
//!
//! # Entity Types
//!
//! - [`Link`] - An alias to URL mapping
//! - [`Click`] - One recorded visit of an alias
//! - [`ClickSummary`] - Per-alias click totals grouped by day, month and client
//!
//! # Design Pattern
//!
//! Entities follow the "New Type" pattern with separate structs for creation:
//! `NewLink` and `NewClick` carry what a write needs, `Link` and `Click` what a
//! read returns.

pub mod click;
pub mod link;

pub use click::{Click, ClickCount, ClickSummary, DeviceType, NewClick};
pub use link::{Link, NewLink};
