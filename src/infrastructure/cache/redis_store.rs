//! Redis-backed cache store.

use super::store::{CacheError, CacheResult, CacheStore};
use crate::domain::keys::CacheKey;
use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use std::time::Duration;
use tracing::{debug, info};

/// Redis cache store shared by every service instance.
///
/// `ConnectionManager` multiplexes one connection and reconnects on failure;
/// cloning it per call is cheap and holds nothing across requests.
pub struct RedisStore {
    client: ConnectionManager,
}

impl RedisStore {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::ConnectionError`] if the URL is invalid, the connection cannot
    /// be established, or the PING health check fails.
    pub async fn connect(redis_url: &str) -> CacheResult<Self> {
        info!("Connecting to Redis");

        let client = Client::open(redis_url).map_err(|e| {
            CacheError::ConnectionError(format!("Failed to create Redis client: {}", e))
        })?;

        let manager = ConnectionManager::new(client).await.map_err(|e| {
            CacheError::ConnectionError(format!("Failed to connect to Redis: {}", e))
        })?;

        let mut test_conn = manager.clone();
        test_conn
            .ping::<()>()
            .await
            .map_err(|e| CacheError::ConnectionError(format!("Redis PING failed: {}", e)))?;

        info!("Connected to Redis");

        Ok(Self { client: manager })
    }
}

/// Redis rejects a zero expiry; sub-second TTLs round up to one second.
fn ttl_seconds(ttl: Duration) -> u64 {
    ttl.as_secs().max(1)
}

/// `EXPIRE` takes a signed count and deletes the key when it is negative.
fn expire_seconds(ttl: Duration) -> i64 {
    i64::try_from(ttl_seconds(ttl)).unwrap_or(i64::MAX)
}

#[async_trait]
impl CacheStore for RedisStore {
    async fn get(&self, key: &CacheKey) -> CacheResult<Option<String>> {
        let mut conn = self.client.clone();
        let value: Option<String> = conn.get(key.to_string()).await?;
        Ok(value)
    }

    async fn set(&self, key: &CacheKey, value: &str, ttl: Duration) -> CacheResult<()> {
        let mut conn = self.client.clone();
        let seconds = ttl_seconds(ttl);
        conn.set_ex::<_, _, ()>(key.to_string(), value, seconds)
            .await?;
        debug!(%key, ttl_secs = seconds, "Cache SET");
        Ok(())
    }

    async fn incr(&self, key: &CacheKey) -> CacheResult<i64> {
        let mut conn = self.client.clone();
        let value: i64 = conn.incr(key.to_string(), 1).await?;
        Ok(value)
    }

    async fn expire(&self, key: &CacheKey, ttl: Duration) -> CacheResult<bool> {
        let mut conn = self.client.clone();
        let applied: bool = conn
            .expire(key.to_string(), expire_seconds(ttl))
            .await?;
        Ok(applied)
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.client.clone();
        conn.ping::<()>().await.is_ok()
    }

    fn backend_name(&self) -> &'static str {
        "redis"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ttl_seconds_rounds_up_to_one() {
        assert_eq!(ttl_seconds(Duration::from_millis(10)), 1);
        assert_eq!(ttl_seconds(Duration::ZERO), 1);
        assert_eq!(ttl_seconds(Duration::from_secs(86_400)), 86_400);
    }

    #[test]
    fn test_expire_seconds_never_negative() {
        assert_eq!(expire_seconds(Duration::from_secs(60)), 60);
        assert_eq!(expire_seconds(Duration::from_secs(u64::MAX)), i64::MAX);
        assert_eq!(expire_seconds(Duration::ZERO), 1);
    }
}
