//! Fixed-window rate limiting backed by the cache store.

use std::sync::Arc;
use std::time::Duration;

use metrics::counter;
use tracing::{debug, warn};

use crate::domain::keys::CacheKey;
use crate::infrastructure::cache::CacheStore;

/// Request budget for one scope: at most `limit` requests per `window`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitPolicy {
    pub limit: u32,
    pub window: Duration,
}

impl RateLimitPolicy {
    pub fn new(limit: u32, window: Duration) -> Self {
        Self { limit, window }
    }
}

/// Outcome of a rate limit check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateDecision {
    Allowed {
        /// Requests seen in the current window, this one included.
        count: i64,
        remaining: u32,
    },
    Limited {
        count: i64,
        /// Upper bound on the wait until the window resets.
        retry_after: Duration,
    },
}

impl RateDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed { .. })
    }
}

/// Fixed-window counter per scope key.
///
/// The first request of a window creates `rate:{scope}` and sets its expiry;
/// later requests only increment, so the window never slides. Counting
/// continues past the limit and every request over it is rejected until the
/// key expires.
///
/// Increment and expiry are two separate store calls. Two concurrent first
/// requests may both set the expiry, which is harmless. A crash between them
/// leaves a counter without expiry.
pub struct RateLimiter {
    cache: Arc<dyn CacheStore>,
}

impl RateLimiter {
    pub fn new(cache: Arc<dyn CacheStore>) -> Self {
        Self { cache }
    }

    /// Counts one request against `scope_key` and decides whether it may proceed.
    ///
    /// Scope keys are caller-defined, e.g. `"shorten:203.0.113.7"`.
    ///
    /// Fails open: if the store cannot be reached the request is allowed.
    pub async fn check_and_increment(
        &self,
        scope_key: &str,
        limit: u32,
        window: Duration,
    ) -> RateDecision {
        let key = CacheKey::rate(scope_key);

        let count = match self.cache.incr(&key).await {
            Ok(count) => count,
            Err(e) => {
                warn!(error = %e, scope_key, "Rate limit counter unavailable, allowing request");
                return RateDecision::Allowed {
                    count: 0,
                    remaining: limit,
                };
            }
        };

        if count == 1
            && let Err(e) = self.cache.expire(&key, window).await
        {
            warn!(error = %e, scope_key, "Failed to set rate window expiry");
        }

        if count > i64::from(limit) {
            debug!(scope_key, count, limit, "Rate limit exceeded");
            counter!("shorty_rate_limited_total").increment(1);
            return RateDecision::Limited {
                count,
                retry_after: window,
            };
        }

        RateDecision::Allowed {
            count,
            remaining: u32::try_from(i64::from(limit) - count).unwrap_or(0),
        }
    }

    /// Same as [`Self::check_and_increment`] with the limits of `policy`.
    pub async fn check(&self, scope_key: &str, policy: &RateLimitPolicy) -> RateDecision {
        self.check_and_increment(scope_key, policy.limit, policy.window)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::cache::{CacheError, MemoryStore, MockCacheStore};

    const WINDOW: Duration = Duration::from_secs(60);

    #[tokio::test(start_paused = true)]
    async fn test_fixed_window_limit_and_reset() {
        let limiter = RateLimiter::new(Arc::new(MemoryStore::new()));

        for i in 1..=5 {
            let decision = limiter.check_and_increment("client", 5, WINDOW).await;
            assert_eq!(
                decision,
                RateDecision::Allowed {
                    count: i,
                    remaining: (5 - i) as u32
                }
            );
        }

        let sixth = limiter.check_and_increment("client", 5, WINDOW).await;
        assert_eq!(
            sixth,
            RateDecision::Limited {
                count: 6,
                retry_after: WINDOW
            }
        );

        tokio::time::advance(WINDOW).await;

        let after_reset = limiter.check_and_increment("client", 5, WINDOW).await;
        assert_eq!(
            after_reset,
            RateDecision::Allowed {
                count: 1,
                remaining: 4
            }
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_window_does_not_slide() {
        let limiter = RateLimiter::new(Arc::new(MemoryStore::new()));
        let policy = RateLimitPolicy::new(2, WINDOW);

        assert!(limiter.check("c", &policy).await.is_allowed());

        tokio::time::advance(Duration::from_secs(50)).await;
        assert!(limiter.check("c", &policy).await.is_allowed());
        assert!(!limiter.check("c", &policy).await.is_allowed());

        // The window reset is anchored at the first request, not the latest.
        tokio::time::advance(Duration::from_secs(10)).await;
        assert!(limiter.check("c", &policy).await.is_allowed());
    }

    #[tokio::test(start_paused = true)]
    async fn test_counts_keep_growing_while_limited() {
        let limiter = RateLimiter::new(Arc::new(MemoryStore::new()));

        limiter.check_and_increment("c", 1, WINDOW).await;
        limiter.check_and_increment("c", 1, WINDOW).await;
        let third = limiter.check_and_increment("c", 1, WINDOW).await;

        assert!(matches!(third, RateDecision::Limited { count: 3, .. }));
    }

    #[tokio::test]
    async fn test_scopes_are_independent() {
        let limiter = RateLimiter::new(Arc::new(MemoryStore::new()));

        assert!(limiter.check_and_increment("a", 1, WINDOW).await.is_allowed());
        assert!(!limiter.check_and_increment("a", 1, WINDOW).await.is_allowed());
        assert!(limiter.check_and_increment("b", 1, WINDOW).await.is_allowed());
    }

    #[tokio::test]
    async fn test_expiry_set_only_on_first_request() {
        let mut cache = MockCacheStore::new();
        let mut next = 0;
        cache.expect_incr().times(3).returning(move |_| {
            next += 1;
            Ok(next)
        });
        cache
            .expect_expire()
            .withf(|key, ttl| key == &CacheKey::rate("c") && *ttl == WINDOW)
            .times(1)
            .returning(|_, _| Ok(true));

        let limiter = RateLimiter::new(Arc::new(cache));

        for _ in 0..3 {
            limiter.check_and_increment("c", 10, WINDOW).await;
        }
    }

    #[tokio::test]
    async fn test_store_failure_fails_open() {
        let mut cache = MockCacheStore::new();
        cache
            .expect_incr()
            .returning(|_| Err(CacheError::ConnectionError("down".to_string())));
        cache.expect_expire().times(0);

        let limiter = RateLimiter::new(Arc::new(cache));

        let decision = limiter.check_and_increment("c", 5, WINDOW).await;
        assert!(decision.is_allowed());
    }
}
