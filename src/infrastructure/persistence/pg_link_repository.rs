//! PostgreSQL implementation of link repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{NewShortLink, ShortLink};
use crate::domain::repositories::{LinkRepository, StoreError, StoreResult};

/// PostgreSQL repository for short links.
///
/// Uniqueness is enforced by the `urls_short_code_key` constraint and visit
/// counting by a single `UPDATE ... RETURNING`, so both hold across any number
/// of service instances sharing the database.
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
}

impl PgLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct UrlRow {
    short_code: String,
    original_url: String,
    clicks: i64,
    created_at: DateTime<Utc>,
}

impl From<UrlRow> for ShortLink {
    fn from(row: UrlRow) -> Self {
        ShortLink::new(row.short_code, row.original_url, row.clicks, row.created_at)
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .is_some_and(sqlx::error::DatabaseError::is_unique_violation)
}

fn map_sqlx_error(err: sqlx::Error) -> StoreError {
    let message = err.to_string();

    match err {
        sqlx::Error::PoolTimedOut => StoreError::Timeout(message),
        sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed
        | sqlx::Error::Io(_)
        | sqlx::Error::Tls(_) => StoreError::Unavailable(message),
        sqlx::Error::ColumnIndexOutOfBounds { .. }
        | sqlx::Error::ColumnNotFound(_)
        | sqlx::Error::ColumnDecode { .. }
        | sqlx::Error::TypeNotFound { .. }
        | sqlx::Error::Decode(_)
        | sqlx::Error::RowNotFound => StoreError::InvalidData(message),
        _ => StoreError::Query(message),
    }
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn exists(&self, code: &str) -> StoreResult<bool> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM urls WHERE short_code = $1)")
            .bind(code)
            .fetch_one(self.pool.as_ref())
            .await
            .map_err(map_sqlx_error)
    }

    async fn insert(&self, new_link: NewShortLink) -> StoreResult<ShortLink> {
        let row = sqlx::query_as::<_, UrlRow>(
            r#"
            INSERT INTO urls (short_code, original_url, clicks, created_at)
            VALUES ($1, $2, 0, $3)
            RETURNING short_code, original_url, clicks, created_at
            "#,
        )
        .bind(new_link.code.as_str())
        .bind(new_link.destination.as_str())
        .bind(new_link.created_at)
        .fetch_one(self.pool.as_ref())
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                StoreError::DuplicateKey(new_link.code.clone())
            } else {
                map_sqlx_error(e)
            }
        })?;

        Ok(row.into())
    }

    async fn get_and_increment(&self, code: &str) -> StoreResult<Option<ShortLink>> {
        let row = sqlx::query_as::<_, UrlRow>(
            r#"
            UPDATE urls
            SET clicks = clicks + 1
            WHERE short_code = $1
            RETURNING short_code, original_url, clicks, created_at
            "#,
        )
        .bind(code)
        .fetch_optional(self.pool.as_ref())
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(ShortLink::from))
    }

    async fn get(&self, code: &str) -> StoreResult<Option<ShortLink>> {
        let row = sqlx::query_as::<_, UrlRow>(
            r#"
            SELECT short_code, original_url, clicks, created_at
            FROM urls
            WHERE short_code = $1
            "#,
        )
        .bind(code)
        .fetch_optional(self.pool.as_ref())
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(ShortLink::from))
    }

    async fn health_check(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1")
            .execute(self.pool.as_ref())
            .await
            .map_err(map_sqlx_error)?;
        Ok(())
    }
}
