//! Domain layer containing business entities and repository contracts.
//!
//! # Architecture
//!
//! - [`entities`] - Links, clicks and click summaries
//! - [`repositories`] - Store trait definitions
//! - [`click_event`] - Click captured by the redirect handler
//! - [`click_worker`] - Background click recording
//!
//! # Click Processing Flow
//!
//! 1. HTTP handler resolves an alias and answers with a redirect
//! 2. [`click_event::ClickEvent`] is offered to a bounded channel
//! 3. [`click_worker::run_click_worker`] records it with retry
//! 4. Click data is persisted via [`repositories::ClickRepository`]

pub mod click_event;
pub mod click_worker;
pub mod entities;
pub mod repositories;
