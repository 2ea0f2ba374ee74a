//! HTTP middleware for request processing.
//!
//! Provides observability and request timeout middleware.

pub mod timeout;
pub mod tracing;
