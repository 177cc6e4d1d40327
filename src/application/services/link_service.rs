//! Link creation and cache-aside redirect resolution.

use std::sync::Arc;
use std::time::Duration;

use metrics::counter;
use serde_json::json;
use tracing::{debug, info, warn};

use crate::domain::entities::{CacheOutcome, CreatedLink, LinkStats, Resolution};
use crate::domain::keys::CacheKey;
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;
use crate::infrastructure::cache::CacheStore;
use crate::utils::base62;
use crate::utils::url_validator::validate_long_url;

/// Default lifetime of a `url:` cache entry.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Service for creating short links and resolving them to long URLs.
///
/// The registry is the source of truth. The cache holds `url:{code}` entries
/// (populated on create and on every miss) and the `clicks:{code}` counters.
/// Cache failures never fail a redirect; registry failures always do.
pub struct LinkService {
    repository: Arc<dyn UrlRepository>,
    cache: Arc<dyn CacheStore>,
    base_url: String,
    cache_ttl: Duration,
}

impl LinkService {
    /// Creates a new link service.
    ///
    /// `base_url` is the public address short URLs are built from, e.g.
    /// `https://s.example.com`.
    pub fn new(
        repository: Arc<dyn UrlRepository>,
        cache: Arc<dyn CacheStore>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            repository,
            cache,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            cache_ttl: DEFAULT_CACHE_TTL,
        }
    }

    /// Overrides the TTL of cached URL entries.
    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    /// Resolves a short code to its long URL.
    ///
    /// # Flow
    ///
    /// 1. Look up `url:{code}` in the cache; a hit is returned as [`CacheOutcome::Hit`]
    /// 2. On a miss (or a cache read error) query the registry
    /// 3. Write the found URL back to the cache and return [`CacheOutcome::Miss`]
    /// 4. Increment `clicks:{code}` once the answer is known
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the registry has no record for the code.
    /// Returns [`AppError::StoreUnavailable`] if the registry cannot be queried.
    pub async fn resolve(&self, short_code: &str) -> Result<Resolution, AppError> {
        if !base62::is_valid_code(short_code) {
            return Err(not_found(short_code));
        }

        let url_key = CacheKey::url(short_code);

        let cached = match self.cache.get(&url_key).await {
            Ok(value) => value,
            Err(e) => {
                warn!(error = %e, short_code, "Cache read failed, falling back to registry");
                None
            }
        };

        let resolution = match cached {
            Some(long_url) => {
                debug!(short_code, "Cache HIT");
                counter!("shorty_cache_lookups_total", "outcome" => "hit").increment(1);
                Resolution {
                    long_url,
                    cache: CacheOutcome::Hit,
                }
            }
            None => {
                let record = self
                    .repository
                    .find_by_code(short_code)
                    .await?
                    .ok_or_else(|| not_found(short_code))?;

                self.populate_cache(short_code, &record.long_url).await;

                debug!(short_code, "Cache MISS");
                counter!("shorty_cache_lookups_total", "outcome" => "miss").increment(1);
                Resolution {
                    long_url: record.long_url,
                    cache: CacheOutcome::Miss,
                }
            }
        };

        self.record_click(short_code).await;

        Ok(resolution)
    }

    /// Creates a short link for `long_url`.
    ///
    /// The registry assigns the id, the code is its base62 encoding, and the
    /// cache is pre-warmed so the first redirect is a hit.
    ///
    /// If encoding or the code update fails after the insert, the inserted row
    /// is deleted again so no code-less record is left behind.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the URL is not an absolute http(s) URL.
    /// Returns [`AppError::StoreUnavailable`] if the registry cannot be written.
    pub async fn create(&self, long_url: &str) -> Result<CreatedLink, AppError> {
        let long_url = validate_long_url(long_url).map_err(|e| {
            AppError::bad_request("Invalid URL format", json!({ "reason": e.to_string() }))
        })?;

        let id = self.repository.insert(&long_url).await?;

        let short_code = match self.assign_code(id).await {
            Ok(code) => code,
            Err(e) => {
                self.discard_record(id).await;
                return Err(e);
            }
        };

        self.populate_cache(&short_code, &long_url).await;

        info!(id, short_code = %short_code, "Short link created");

        Ok(CreatedLink {
            id,
            short_url: self.short_url(&short_code),
            short_code,
            long_url,
        })
    }

    /// Returns the long URL and click count of a short link.
    ///
    /// Reads the registry directly and does not count as a click.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] for unknown codes and
    /// [`AppError::StoreUnavailable`] if either store cannot be read.
    pub async fn stats(&self, short_code: &str) -> Result<LinkStats, AppError> {
        if !base62::is_valid_code(short_code) {
            return Err(not_found(short_code));
        }

        let record = self
            .repository
            .find_by_code(short_code)
            .await?
            .ok_or_else(|| not_found(short_code))?;

        Ok(LinkStats {
            short_code: short_code.to_string(),
            long_url: record.long_url,
            clicks: self.clicks(short_code).await?,
        })
    }

    /// Returns the click counter of a short code, `0` if it never resolved.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreUnavailable`] if the counter cannot be read.
    pub async fn clicks(&self, short_code: &str) -> Result<i64, AppError> {
        let key = CacheKey::clicks(short_code);

        match self.cache.get(&key).await {
            Ok(Some(value)) => value.parse().map_err(|_| {
                AppError::internal(
                    "Click counter holds a non-integer value",
                    json!({ "key": key.to_string() }),
                )
            }),
            Ok(None) => Ok(0),
            Err(e) => Err(AppError::store_unavailable(
                "Click counter unavailable",
                json!({ "reason": e.to_string() }),
            )),
        }
    }

    /// Number of short links in the registry.
    pub async fn total_links(&self) -> Result<i64, AppError> {
        self.repository.count().await
    }

    /// Builds the fully qualified short URL for a code.
    pub fn short_url(&self, short_code: &str) -> String {
        format!("{}/{}", self.base_url, short_code)
    }

    async fn assign_code(&self, id: i64) -> Result<String, AppError> {
        let short_code = base62::encode(id)?;
        self.repository.update_code(id, &short_code).await?;
        Ok(short_code)
    }

    /// Best-effort removal of a record whose create did not complete.
    async fn discard_record(&self, id: i64) {
        match self.repository.delete(id).await {
            Ok(_) => debug!(id, "Discarded incomplete record"),
            Err(e) => warn!(id, error = %e, "Failed to discard incomplete record"),
        }
    }

    async fn populate_cache(&self, short_code: &str, long_url: &str) {
        if let Err(e) = self
            .cache
            .set(&CacheKey::url(short_code), long_url, self.cache_ttl)
            .await
        {
            warn!(error = %e, short_code, "Failed to cache URL");
        }
    }

    async fn record_click(&self, short_code: &str) {
        if let Err(e) = self.cache.incr(&CacheKey::clicks(short_code)).await {
            counter!("shorty_click_increment_failures_total").increment(1);
            warn!(error = %e, short_code, "Failed to increment click counter");
        }
    }
}

fn not_found(short_code: &str) -> AppError {
    AppError::not_found("Short link not found", json!({ "code": short_code }))
}
