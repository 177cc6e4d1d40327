//! Utility functions for short code encoding and URL validation.
//!
//! - [`base62`] - Record id to short code encoding (and back)
//! - [`url_validator`] - Long URL validation and canonicalization

pub mod base62;
pub mod url_validator;
