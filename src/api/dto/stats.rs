//! DTOs for the click statistics endpoint.

use serde::Serialize;

use crate::domain::entities::LinkStats;

/// Click count of a single short link.
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub short_code: String,
    pub long_url: String,
    pub clicks: i64,
}

impl From<LinkStats> for StatsResponse {
    fn from(stats: LinkStats) -> Self {
        Self {
            short_code: stats.short_code,
            long_url: stats.long_url,
            clicks: stats.clicks,
        }
    }
}
