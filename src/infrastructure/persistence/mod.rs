//! PostgreSQL repository implementations.
//!
//! - [`PgUrlRepository`] - URL registry (insert, code assignment, lookup by code)

pub mod pg_url_repository;

pub use pg_url_repository::PgUrlRepository;
