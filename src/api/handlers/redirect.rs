//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{HeaderName, HeaderValue, StatusCode, header},
    response::IntoResponse,
};
use serde_json::json;

use crate::error::AppError;
use crate::state::AppState;

const X_CACHE: HeaderName = HeaderName::from_static("x-cache");

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Request Flow
///
/// Delegates to [`crate::application::services::LinkService::resolve`]: cache
/// lookup, registry fallback with cache population, click counting.
///
/// # Responses
///
/// - **302 Found** with `Location` set to the long URL. The `X-Cache` header
///   reports `hit` or `miss`.
/// - **404 Not Found** if the code is unknown.
/// - **503 Service Unavailable** if the registry is needed and unreachable.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let resolution = state.link_service.resolve(&code).await?;

    let location = HeaderValue::try_from(resolution.long_url.as_str()).map_err(|_| {
        AppError::internal(
            "Stored URL is not a valid Location header",
            json!({ "code": code }),
        )
    })?;

    Ok((
        StatusCode::FOUND,
        [
            (header::LOCATION, location),
            (header::CACHE_CONTROL, HeaderValue::from_static("no-store")),
            (X_CACHE, HeaderValue::from_static(resolution.cache.as_str())),
        ],
    ))
}
