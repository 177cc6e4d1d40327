//! Cache store trait and error types.

use async_trait::async_trait;
use std::time::Duration;

use crate::domain::keys::CacheKey;

/// Errors that can occur during cache operations.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("Cache connection error: {0}")]
    ConnectionError(String),

    #[error("Cache operation error: {0}")]
    OperationError(String),
}

impl From<redis::RedisError> for CacheError {
    fn from(e: redis::RedisError) -> Self {
        if e.is_io_error() || e.is_connection_dropped() || e.is_timeout() {
            Self::ConnectionError(e.to_string())
        } else {
            Self::OperationError(e.to_string())
        }
    }
}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Key-value capability used by the redirect path, click counters and the rate limiter.
///
/// Every call is atomic on its own; no multi-key transactions are needed.
/// Implementations report failures instead of hiding them, and callers decide
/// whether a failure is fatal. On the read path it never is: the cache is an
/// optimization and the registry stays the source of truth.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::RedisStore`] - Redis, shared by all instances
/// - [`crate::infrastructure::cache::MemoryStore`] - In-process, single instance and tests
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Returns the value stored at `key`, or `None` if absent or expired.
    async fn get(&self, key: &CacheKey) -> CacheResult<Option<String>>;

    /// Stores `value` at `key`, replacing any previous value, expiring after `ttl`.
    async fn set(&self, key: &CacheKey, value: &str, ttl: Duration) -> CacheResult<()>;

    /// Increments the integer at `key` by one and returns the new value.
    ///
    /// A missing key counts as `0`. An existing expiry is left untouched.
    async fn incr(&self, key: &CacheKey) -> CacheResult<i64>;

    /// Sets the expiry of an existing key.
    ///
    /// Returns `Ok(false)` if the key does not exist.
    async fn expire(&self, key: &CacheKey, ttl: Duration) -> CacheResult<bool>;

    /// Checks if the cache backend is reachable.
    async fn health_check(&self) -> bool;

    /// Backend name for logs and the health endpoint.
    fn backend_name(&self) -> &'static str;
}
