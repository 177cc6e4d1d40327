//! Application layer services implementing business logic.
//!
//! Services coordinate the registry and the cache store behind the HTTP handlers.
//!
//! # Available Services
//!
//! - [`services::link_service::LinkService`] - Short link creation and cache-aside resolution
//! - [`services::rate_limiter::RateLimiter`] - Fixed-window rate limiting

pub mod services;
