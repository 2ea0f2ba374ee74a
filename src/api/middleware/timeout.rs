//! Request timeout middleware.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::time::Duration;

use crate::error::AppError;

/// Aborts requests that run longer than the configured timeout.
///
/// Store calls run inside the request future, so they are cancelled with it.
/// The client receives the usual JSON error body.
///
/// # Integration
///
/// ```rust,ignore
/// let app = Router::new()
///     .route("/urls", post(shorten_handler))
///     .layer(middleware::from_fn_with_state(Duration::from_secs(10), timeout::layer));
/// ```
pub async fn layer(State(timeout): State<Duration>, request: Request, next: Next) -> Response {
    let path = request.uri().path().to_owned();

    match tokio::time::timeout(timeout, next.run(request)).await {
        Ok(response) => response,
        Err(_) => {
            tracing::warn!(%path, timeout_ms = timeout.as_millis() as u64, "Request timed out");
            AppError::internal(
                "Request timed out",
                json!({ "timeout_ms": timeout.as_millis() as u64 }),
            )
            .into_response()
        }
    }
}
