//! Cache key namespaces.
//!
//! Every key written to the cache store is built here. Adding a new kind of
//! entry means adding a variant, which keeps prefixes from colliding.

use std::fmt;

/// A namespaced cache key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheKey {
    /// `url:{short_code}` - cached long URL, expires after the cache TTL.
    Url(String),
    /// `clicks:{short_code}` - redirect counter, never expires.
    Clicks(String),
    /// `rate:{scope_key}` - fixed-window request counter.
    Rate(String),
}

impl CacheKey {
    pub fn url(short_code: impl Into<String>) -> Self {
        Self::Url(short_code.into())
    }

    pub fn clicks(short_code: impl Into<String>) -> Self {
        Self::Clicks(short_code.into())
    }

    pub fn rate(scope_key: impl Into<String>) -> Self {
        Self::Rate(scope_key.into())
    }

    pub fn prefix(&self) -> &'static str {
        match self {
            Self::Url(_) => "url:",
            Self::Clicks(_) => "clicks:",
            Self::Rate(_) => "rate:",
        }
    }

    fn suffix(&self) -> &str {
        match self {
            Self::Url(s) | Self::Clicks(s) | Self::Rate(s) => s,
        }
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.prefix(), self.suffix())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_rendering() {
        assert_eq!(CacheKey::url("abc").to_string(), "url:abc");
        assert_eq!(CacheKey::clicks("abc").to_string(), "clicks:abc");
        assert_eq!(
            CacheKey::rate("shorten:10.0.0.1").to_string(),
            "rate:shorten:10.0.0.1"
        );
    }

    #[test]
    fn test_same_suffix_different_namespaces() {
        assert_ne!(
            CacheKey::url("1").to_string(),
            CacheKey::clicks("1").to_string()
        );
        assert_ne!(CacheKey::url("1"), CacheKey::clicks("1"));
    }
}
