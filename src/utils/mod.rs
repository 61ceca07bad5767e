//! Utility functions used by the core services and the HTTP layer.
//!
//! - [`alias_generator`] - Random alias generation
//! - [`client_ip`] - Client IP extraction from proxy headers
//! - [`user_agent`] - User-Agent to client name and device classification

pub mod alias_generator;
pub mod client_ip;
pub mod user_agent;
