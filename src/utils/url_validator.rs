//! Validation of long URLs submitted for shortening.
//!
//! Only absolute `http`/`https` URLs with a host are accepted. The returned string
//! is the canonical serialization produced by the `url` crate: scheme and host are
//! lowercased and default ports dropped, everything else (path, query, fragment)
//! is kept so the redirect lands exactly where the caller asked.

use url::Url;

/// Upper bound on accepted URL length, in bytes.
pub const MAX_URL_LENGTH: u64 = 2048;

/// Reasons a long URL is rejected.
#[derive(Debug, thiserror::Error)]
pub enum UrlValidationError {
    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,

    #[error("URL must contain a host")]
    MissingHost,

    #[error("URL is longer than {MAX_URL_LENGTH} bytes")]
    TooLong,
}

/// Parses and canonicalizes a long URL.
///
/// # Errors
///
/// Returns [`UrlValidationError`] describing the first rule the input violates.
///
/// # Examples
///
/// ```
/// use shorty::utils::url_validator::validate_long_url;
///
/// assert_eq!(
///     validate_long_url("HTTPS://Example.com:443/a").unwrap(),
///     "https://example.com/a"
/// );
/// assert!(validate_long_url("javascript:alert(1)").is_err());
/// ```
pub fn validate_long_url(input: &str) -> Result<String, UrlValidationError> {
    let input = input.trim();
    if input.len() as u64 > MAX_URL_LENGTH {
        return Err(UrlValidationError::TooLong);
    }

    let url = Url::parse(input).map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(UrlValidationError::UnsupportedProtocol);
    }

    if url.host_str().is_none_or(str::is_empty) {
        return Err(UrlValidationError::MissingHost);
    }

    Ok(url.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_plain_https() {
        assert_eq!(
            validate_long_url("https://example.com/a").unwrap(),
            "https://example.com/a"
        );
    }

    #[test]
    fn test_canonicalizes_host_and_port() {
        assert_eq!(
            validate_long_url("HTTP://EXAMPLE.COM:80/Path?q=Rust").unwrap(),
            "http://example.com/Path?q=Rust"
        );
    }

    #[test]
    fn test_keeps_custom_port_and_fragment() {
        assert_eq!(
            validate_long_url("http://localhost:8080/docs#install").unwrap(),
            "http://localhost:8080/docs#install"
        );
    }

    #[test]
    fn test_trims_whitespace() {
        assert_eq!(
            validate_long_url("  https://example.com/x \n").unwrap(),
            "https://example.com/x"
        );
    }

    #[test]
    fn test_rejects_relative_url() {
        assert!(matches!(
            validate_long_url("example.com/a"),
            Err(UrlValidationError::InvalidFormat(_))
        ));
        assert!(matches!(
            validate_long_url(""),
            Err(UrlValidationError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_rejects_other_schemes() {
        for input in [
            "ftp://example.com/file.txt",
            "javascript:alert('xss')",
            "data:text/plain,Hello",
            "mailto:someone@example.com",
        ] {
            assert!(
                matches!(
                    validate_long_url(input),
                    Err(UrlValidationError::UnsupportedProtocol)
                ),
                "{input} should be rejected"
            );
        }
    }

    #[test]
    fn test_rejects_too_long() {
        let url = format!("https://example.com/{}", "a".repeat(MAX_URL_LENGTH as usize));
        assert!(matches!(
            validate_long_url(&url),
            Err(UrlValidationError::TooLong)
        ));
    }
}
