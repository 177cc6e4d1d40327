//! Data Transfer Objects for API requests and responses.

pub mod health;
pub mod shorten;
pub mod stats;
