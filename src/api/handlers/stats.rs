//! Handler for per-link click statistics.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::stats::StatsResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Returns the click count of a short link.
///
/// # Endpoint
///
/// `GET /api/stats/{code}`
///
/// Reading stats does not count as a click.
///
/// # Errors
///
/// - 404 Not Found if the code is unknown
/// - 503 Service Unavailable if the registry or the counter store is unreachable
pub async fn stats_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<StatsResponse>, AppError> {
    let stats = state.link_service.stats(&code).await?;
    Ok(Json(stats.into()))
}
