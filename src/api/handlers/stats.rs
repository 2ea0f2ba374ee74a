//! Handler for link statistics.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::stats::StatsResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Retrieves visit statistics for a short link.
///
/// # Endpoint
///
/// `GET /urls/{code}/stats`
///
/// # Response
///
/// ```json
/// {
///   "short_code": "aB3xY9",
///   "original_url": "https://example.com/page",
///   "clicks": 1,
///   "created_at": "2025-01-01T12:00:00Z"
/// }
/// ```
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist.
pub async fn stats_handler(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<StatsResponse>, AppError> {
    let link = state.redirect_service.stats(&code).await?;

    Ok(Json(link.into()))
}
