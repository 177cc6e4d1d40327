//! In-process cache store.

use super::store::{CacheError, CacheResult, CacheStore};
use crate::domain::keys::CacheKey;
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;

#[derive(Debug, Clone)]
struct Entry {
    value: String,
    /// `None` when unset or when the TTL does not fit the clock.
    expires_at: Option<Instant>,
}

impl Entry {
    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|at| now >= at)
    }
}

/// A cache store living in process memory.
///
/// Used when Redis is not configured and in tests. Counters and rate windows
/// are only correct for a single service instance.
///
/// Per-key atomicity comes from the `DashMap` shard lock held by each operation.
/// Expired entries are dropped lazily on access and by [`MemoryStore::purge_expired`].
/// Expiry follows `tokio::time`, so tests can move the clock with
/// `tokio::time::advance`.
#[derive(Clone, Default)]
pub struct MemoryStore {
    entries: Arc<DashMap<String, Entry>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        debug!("Using in-memory cache store");
        Self::default()
    }

    /// Removes every expired entry and returns how many were dropped.
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired(now));
        before.saturating_sub(self.entries.len())
    }

    /// Number of stored entries, including expired ones not yet purged.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl CacheStore for MemoryStore {
    async fn get(&self, key: &CacheKey) -> CacheResult<Option<String>> {
        let key = key.to_string();
        let now = Instant::now();

        if let Some(entry) = self.entries.get(&key)
            && !entry.is_expired(now)
        {
            return Ok(Some(entry.value.clone()));
        }

        self.entries.remove_if(&key, |_, entry| entry.is_expired(now));
        Ok(None)
    }

    async fn set(&self, key: &CacheKey, value: &str, ttl: Duration) -> CacheResult<()> {
        self.entries.insert(
            key.to_string(),
            Entry {
                value: value.to_string(),
                expires_at: Instant::now().checked_add(ttl),
            },
        );
        Ok(())
    }

    async fn incr(&self, key: &CacheKey) -> CacheResult<i64> {
        let now = Instant::now();
        let mut entry = self.entries.entry(key.to_string()).or_insert_with(|| Entry {
            value: "0".to_string(),
            expires_at: None,
        });

        if entry.is_expired(now) {
            entry.value = "0".to_string();
            entry.expires_at = None;
        }

        let current: i64 = entry.value.parse().map_err(|_| {
            CacheError::OperationError(format!("value at {} is not an integer", key))
        })?;
        let next = current
            .checked_add(1)
            .ok_or_else(|| CacheError::OperationError(format!("increment overflow at {}", key)))?;

        entry.value = next.to_string();
        Ok(next)
    }

    async fn expire(&self, key: &CacheKey, ttl: Duration) -> CacheResult<bool> {
        let now = Instant::now();
        match self.entries.get_mut(&key.to_string()) {
            Some(mut entry) if !entry.is_expired(now) => {
                entry.expires_at = now.checked_add(ttl);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn health_check(&self) -> bool {
        true
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
