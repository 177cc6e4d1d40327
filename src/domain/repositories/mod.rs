//! Repository trait definitions for the domain layer.
//!
//! Traits define the contract for registry access; the PostgreSQL implementation
//! lives in `crate::infrastructure::persistence`. Mock implementations are
//! auto-generated via `mockall` for unit tests.
//!
//! # Testing
//!
//! See `tests/repository_url.rs` for the PostgreSQL implementation.

pub mod url_repository;

pub use url_repository::UrlRepository;

#[cfg(test)]
pub use url_repository::MockUrlRepository;
