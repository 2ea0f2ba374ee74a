//! Redirect resolution and visit statistics service.

use std::sync::Arc;

use crate::domain::entities::ShortLink;
use crate::domain::repositories::{LinkRepository, StoreResult};
use crate::error::AppError;
use crate::utils::code_generator::is_valid_code;
use serde_json::json;

/// Service resolving short codes for redirects and stats queries.
///
/// Every successful [`resolve`](RedirectService::resolve) counts exactly one
/// visit. [`stats`](RedirectService::stats) never changes the counter.
pub struct RedirectService {
    repository: Arc<dyn LinkRepository>,
}

impl RedirectService {
    /// Creates a new redirect service.
    pub fn new(repository: Arc<dyn LinkRepository>) -> Self {
        Self { repository }
    }

    /// Records a visit and returns the destination URL.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the code was never allocated or
    /// contains symbols outside the code alphabet.
    /// Returns [`AppError::Internal`] on store failures.
    pub async fn resolve(&self, code: &str) -> Result<String, AppError> {
        if !is_valid_code(code) {
            return Err(not_found(code));
        }

        let link = self
            .repository
            .get_and_increment(code)
            .await?
            .ok_or_else(|| not_found(code))?;

        metrics::counter!("shortlink_redirects_total").increment(1);
        tracing::debug!(code = %link.code, visits = link.visit_count, "Redirect resolved");

        Ok(link.destination)
    }

    /// Returns a snapshot of the link and its visit count.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the code was never allocated.
    /// Returns [`AppError::Internal`] on store failures.
    pub async fn stats(&self, code: &str) -> Result<ShortLink, AppError> {
        if !is_valid_code(code) {
            return Err(not_found(code));
        }

        self.repository
            .get(code)
            .await?
            .ok_or_else(|| not_found(code))
    }

    /// Checks that the underlying store answers.
    ///
    /// The raw [`StoreError`](crate::domain::repositories::StoreError) is
    /// returned so callers can report the cause.
    pub async fn store_health(&self) -> StoreResult<()> {
        self.repository.health_check().await
    }
}

fn not_found(code: &str) -> AppError {
    AppError::not_found("Short link not found", json!({ "code": code }))
}
