//! Handler for link creation endpoint.

use axum::{Json, extract::State, extract::rejection::JsonRejection, http::StatusCode};
use serde_json::json;
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short link for a long URL.
///
/// # Endpoint
///
/// `POST /urls`
///
/// # Request Body
///
/// ```json
/// { "url": "https://example.com/page" }
/// ```
///
/// # Response
///
/// `201 Created`
///
/// ```json
/// {
///   "short_code": "aB3xY9",
///   "short_url": "http://localhost:3000/aB3xY9"
/// }
/// ```
///
/// # Errors
///
/// - 400 Bad Request if the body is not JSON, `url` is missing, or `url` is
///   not an absolute HTTP(S) URL
/// - 500 Internal Server Error if no unique code could be allocated or the
///   store failed
pub async fn shorten_handler(
    State(state): State<AppState>,
    payload: Result<Json<ShortenRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ShortenResponse>), AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let url = payload
        .url
        .ok_or_else(|| AppError::bad_request("Field 'url' is required", json!({})))?;

    let link = state.link_service.create_short_link(url).await?;

    let response = ShortenResponse {
        short_url: state.short_url(&link.code),
        short_code: link.code,
    };

    Ok((StatusCode::CREATED, Json(response)))
}
