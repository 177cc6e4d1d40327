//! Handler for link shortening endpoint.

use axum::{Json, extract::State, http::StatusCode};
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short URL for a long URL.
///
/// # Endpoint
///
/// `POST /api/shorten`
///
/// Guarded by the fixed-window limiter in
/// [`crate::api::middleware::rate_limit::layer`].
///
/// # Request Body
///
/// ```json
/// { "url": "https://example.com/a" }
/// ```
///
/// # Response
///
/// `201 Created`
///
/// ```json
/// {
///   "short_code": "1",
///   "short_url": "https://s.example.com/1",
///   "long_url": "https://example.com/a"
/// }
/// ```
///
/// # Errors
///
/// - 400 Bad Request if the URL is invalid
/// - 429 Too Many Requests if the client exhausted its window
/// - 503 Service Unavailable if the registry cannot be written
pub async fn shorten_handler(
    State(state): State<AppState>,
    Json(payload): Json<ShortenRequest>,
) -> Result<(StatusCode, Json<ShortenResponse>), AppError> {
    payload.validate()?;

    let created = state.link_service.create(&payload.url).await?;

    Ok((StatusCode::CREATED, Json(created.into())))
}
