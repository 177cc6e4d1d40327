//! HTTP middleware for request processing and protection.
//!
//! Provides fixed-window rate limiting and request tracing.

pub mod rate_limit;
pub mod tracing;
