//! Infrastructure layer for external integrations.
//!
//! Concrete implementations of the store contracts used by the services.
//!
//! # Modules
//!
//! - [`cache`] - Cache stores (Redis and in-memory)
//! - [`persistence`] - PostgreSQL registry

pub mod cache;
pub mod persistence;
