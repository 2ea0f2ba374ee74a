//! Repository trait for short link data access.

use crate::domain::entities::{NewShortLink, ShortLink};
use async_trait::async_trait;
use thiserror::Error;

/// Errors raised by a [`LinkRepository`] implementation.
///
/// `DuplicateKey` is the only variant the allocation loop treats as
/// retryable. Everything else is fatal for the request.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("short code already exists: {0}")]
    DuplicateKey(String),

    #[error("storage timed out: {0}")]
    Timeout(String),

    #[error("storage unavailable: {0}")]
    Unavailable(String),

    #[error("storage returned invalid data: {0}")]
    InvalidData(String),

    #[error("storage query failed: {0}")]
    Query(String),
}

/// Result type for repository operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Repository interface owning every short link record.
///
/// Callers only ever receive copies of the stored records.
///
/// # Atomicity
///
/// - [`insert`](LinkRepository::insert) must reject a duplicate code at the
///   storage layer, regardless of any earlier [`exists`](LinkRepository::exists) check.
/// - [`get_and_increment`](LinkRepository::get_and_increment) must apply the
///   increment and read the result as one step, so concurrent redirects never
///   lose an update.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::InMemoryLinkRepository`] - in-process fake
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Returns `true` if a link with this code is stored.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] on connectivity or query failures.
    async fn exists(&self, code: &str) -> StoreResult<bool>;

    /// Inserts a new link with a zero visit counter.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DuplicateKey`] if the code is already taken.
    /// Returns other [`StoreError`] variants on storage failures.
    async fn insert(&self, new_link: NewShortLink) -> StoreResult<ShortLink>;

    /// Increments the visit counter by one and returns the updated record.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(ShortLink))` with the post-increment counter
    /// - `Ok(None)` if the code is unknown
    async fn get_and_increment(&self, code: &str) -> StoreResult<Option<ShortLink>>;

    /// Reads a link without touching its counter.
    async fn get(&self, code: &str) -> StoreResult<Option<ShortLink>>;

    /// Verifies the storage backend is reachable.
    async fn health_check(&self) -> StoreResult<()>;
}
