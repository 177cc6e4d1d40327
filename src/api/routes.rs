//! API route configuration.
//!
//! The create endpoint is guarded by the fixed-window rate limiter in
//! [`crate::api::middleware::rate_limit`].

use crate::api::handlers::{shorten_handler, stats_handler};
use crate::api::middleware::rate_limit;
use crate::state::AppState;
use axum::{
    Router, middleware,
    routing::{get, post},
};

/// All routes mounted under `/api`.
///
/// # Endpoints
///
/// - `POST /shorten`        - Register a long URL (rate limited per client)
/// - `GET  /stats/{code}`   - Click count for a short code
pub fn api_routes(state: AppState) -> Router<AppState> {
    let shorten = Router::new()
        .route("/shorten", post(shorten_handler))
        .route_layer(middleware::from_fn_with_state(state, rate_limit::layer));

    Router::new()
        .merge(shorten)
        .route("/stats/{code}", get(stats_handler))
}
