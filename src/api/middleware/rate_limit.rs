//! Fixed-window rate limiting middleware for the create endpoint.

use axum::{
    extract::{ConnectInfo, Request, State, connect_info::MockConnectInfo},
    http::{HeaderMap, HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};
use serde_json::json;
use std::net::{IpAddr, SocketAddr};

use crate::application::services::RateDecision;
use crate::error::AppError;
use crate::state::AppState;

const X_RATELIMIT_LIMIT: HeaderName = HeaderName::from_static("x-ratelimit-limit");
const X_RATELIMIT_REMAINING: HeaderName = HeaderName::from_static("x-ratelimit-remaining");

/// Scope prefix of the counters kept for `POST /api/shorten`.
pub const SHORTEN_SCOPE: &str = "shorten";

/// Counts the request against the client's window and rejects it when over budget.
///
/// # Limits
///
/// Taken from [`AppState::rate_limit`] (`RATE_LIMIT_MAX` per
/// `RATE_LIMIT_WINDOW_SECONDS`). Requests exceeding the limit receive
/// `429 Too Many Requests` with a `Retry-After` header.
///
/// # Key Extraction
///
/// The scope key is `shorten:{client_ip}`. The client IP comes from the socket
/// peer address, or from `X-Forwarded-For` / `X-Real-IP` when
/// [`AppState::behind_proxy`] is set.
///
/// # Example
///
/// ```rust,ignore
/// let app = Router::new()
///     .route("/shorten", post(shorten_handler))
///     .route_layer(middleware::from_fn_with_state(state.clone(), rate_limit::layer));
/// ```
pub async fn layer(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let client = client_ip(&request, state.behind_proxy)
        .map(|ip| ip.to_string())
        .unwrap_or_else(|| "unknown".to_string());
    let scope_key = format!("{SHORTEN_SCOPE}:{client}");

    match state.rate_limiter.check(&scope_key, &state.rate_limit).await {
        RateDecision::Allowed { remaining, .. } => {
            let mut response = next.run(request).await;
            let headers = response.headers_mut();
            headers.insert(X_RATELIMIT_LIMIT, HeaderValue::from(state.rate_limit.limit));
            headers.insert(X_RATELIMIT_REMAINING, HeaderValue::from(remaining));
            Ok(response)
        }
        RateDecision::Limited { count, retry_after } => {
            tracing::info!(client = %client, count, "Create request rate limited");
            Err(AppError::rate_limited(
                retry_after.as_secs(),
                json!({
                    "limit": state.rate_limit.limit,
                    "window_seconds": state.rate_limit.window.as_secs(),
                }),
            ))
        }
    }
}

/// Determines the client IP of a request.
///
/// The peer address is looked up the way the `ConnectInfo` extractor does it:
/// the extension set by `into_make_service_with_connect_info`, then a
/// `MockConnectInfo` layer.
fn client_ip(request: &Request, behind_proxy: bool) -> Option<IpAddr> {
    if behind_proxy && let Some(ip) = forwarded_ip(request.headers()) {
        return Some(ip);
    }

    let extensions = request.extensions();
    extensions
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip())
        .or_else(|| {
            extensions
                .get::<MockConnectInfo<SocketAddr>>()
                .map(|MockConnectInfo(addr)| addr.ip())
        })
}

/// First address of `X-Forwarded-For`, else `X-Real-IP`.
fn forwarded_ip(headers: &HeaderMap) -> Option<IpAddr> {
    let from_forwarded_for = headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .and_then(|v| v.trim().parse().ok());

    from_forwarded_for.or_else(|| {
        headers
            .get("x-real-ip")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse().ok())
    })
}
