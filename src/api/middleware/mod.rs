//! HTTP middleware for request processing.
//!
//! Provides request tracing and the request deadline.

pub mod timeout;
pub mod tracing;
