//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `POST /urls`               - Create a short link
//! - `GET  /urls/{code}/stats`  - Visit statistics
//! - `GET  /health`             - Health check
//! - `GET  /{code}`             - Short link redirect
//!
//! Fixed routes win over `/{code}`; the code generator never hands out a
//! code equal to a fixed segment. Unmatched paths and methods get the
//! JSON error body like every other failure.
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Timeout** - Per-request deadline covering store calls

use crate::api;
use crate::api::handlers::{
    health_handler, method_not_allowed_handler, not_found_handler, redirect_handler,
};
use crate::api::middleware::{timeout, tracing as trace};
use crate::state::AppState;
use axum::routing::get;
use axum::{Router, middleware};
use std::time::Duration;

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `request_timeout` - deadline applied to every request
pub fn app_router(state: AppState, request_timeout: Duration) -> Router {
    Router::new()
        .merge(api::routes::url_routes())
        .route("/health", get(health_handler))
        .route("/{code}", get(redirect_handler))
        .fallback(not_found_handler)
        .method_not_allowed_fallback(method_not_allowed_handler)
        .with_state(state)
        .layer(middleware::from_fn_with_state(
            request_timeout,
            timeout::layer,
        ))
        .layer(trace::layer())
}
