//! API route configuration.

use crate::api::handlers::{shorten_handler, stats_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Link management routes.
///
/// # Endpoints
///
/// - `POST /urls`               - Create a short link
/// - `GET  /urls/{code}/stats`  - Visit statistics for a short link
pub fn url_routes() -> Router<AppState> {
    Router::new()
        .route("/urls", post(shorten_handler))
        .route("/urls/{code}/stats", get(stats_handler))
}
