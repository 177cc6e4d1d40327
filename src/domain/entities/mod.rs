//! Core domain entities.
//!
//! - [`UrlRecord`] - A registry row: id, long URL and (once assigned) short code
//! - [`Resolution`] / [`CacheOutcome`] - The answer to a redirect lookup
//! - [`CreatedLink`] - The answer to a create request
//! - [`LinkStats`] - Click count of a short link

pub mod link;
pub mod url_record;

pub use link::{CacheOutcome, CreatedLink, LinkStats, Resolution};
pub use url_record::UrlRecord;
