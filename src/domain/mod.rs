//! Domain layer containing business entities and store contracts.
//!
//! - [`entities`] - Core data structures and operation outcomes
//! - [`keys`] - Cache key namespaces
//! - [`repositories`] - Registry trait definitions
//!
//! # Redirect Flow
//!
//! 1. HTTP handler receives `GET /{code}`
//! 2. [`crate::application::services::LinkService::resolve`] checks `url:{code}` in the cache
//! 3. On a miss the [`repositories::UrlRepository`] is queried and the cache is populated
//! 4. `clicks:{code}` is incremented and the long URL returned

pub mod entities;
pub mod keys;
pub mod repositories;
