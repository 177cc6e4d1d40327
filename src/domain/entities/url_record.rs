//! URL record entity stored in the registry.

use chrono::{DateTime, Utc};

/// A registry row mapping a store-assigned id to a long URL.
///
/// `short_code` is `None` only between the insert and the code update of a
/// create operation. Once set it never changes.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct UrlRecord {
    pub id: i64,
    pub long_url: String,
    pub short_code: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl UrlRecord {
    /// Creates a new UrlRecord instance.
    pub fn new(
        id: i64,
        long_url: String,
        short_code: Option<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            long_url,
            short_code,
            created_at,
        }
    }

    /// Returns true once the record has been given its short code.
    pub fn has_code(&self) -> bool {
        self.short_code.is_some()
    }
}
