//! Outcomes of the redirect and create operations.

use serde::Serialize;

/// Which path produced a resolved long URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheOutcome {
    /// Served from the `url:` cache entry.
    Hit,
    /// Loaded from the registry and written back to the cache.
    Miss,
}

impl CacheOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hit => "hit",
            Self::Miss => "miss",
        }
    }
}

/// A successfully resolved short code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub long_url: String,
    pub cache: CacheOutcome,
}

/// A freshly created short link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreatedLink {
    pub id: i64,
    pub short_code: String,
    pub short_url: String,
    pub long_url: String,
}

/// Click count for a short link, as reported by the stats endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkStats {
    pub short_code: String,
    pub long_url: String,
    pub clicks: i64,
}
