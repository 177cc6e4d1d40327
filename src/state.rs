//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::{LinkService, RateLimitPolicy, RateLimiter};
use crate::infrastructure::cache::CacheStore;

/// Handles to the services behind the HTTP layer.
///
/// Cloned per request; every field is an `Arc` or `Copy`.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService>,
    pub rate_limiter: Arc<RateLimiter>,
    pub rate_limit: RateLimitPolicy,
    pub cache: Arc<dyn CacheStore>,
    /// Read the client IP from proxy headers instead of the socket peer.
    pub behind_proxy: bool,
}

impl AppState {
    pub fn new(
        link_service: Arc<LinkService>,
        cache: Arc<dyn CacheStore>,
        rate_limit: RateLimitPolicy,
        behind_proxy: bool,
    ) -> Self {
        Self {
            link_service,
            rate_limiter: Arc::new(RateLimiter::new(cache.clone())),
            rate_limit,
            cache,
            behind_proxy,
        }
    }
}
