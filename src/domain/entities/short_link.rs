//! Short link entity representing a code-to-destination mapping.

use chrono::{DateTime, Utc};

/// A shortened URL with its visit counter.
///
/// `code`, `destination` and `created_at` never change after creation.
/// `visit_count` only grows, one step per redirect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortLink {
    pub code: String,
    pub destination: String,
    pub visit_count: i64,
    pub created_at: DateTime<Utc>,
}

impl ShortLink {
    /// Creates a new ShortLink instance.
    pub fn new(
        code: String,
        destination: String,
        visit_count: i64,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            code,
            destination,
            visit_count,
            created_at,
        }
    }
}

/// Input data for inserting a new short link.
///
/// The visit counter of a freshly inserted link always starts at zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewShortLink {
    pub code: String,
    pub destination: String,
    pub created_at: DateTime<Utc>,
}

impl NewShortLink {
    /// Builds an insert request stamped with the current time.
    pub fn now(code: String, destination: String) -> Self {
        Self {
            code,
            destination,
            created_at: Utc::now(),
        }
    }

    /// Converts the insert request into the stored entity.
    pub fn into_link(self) -> ShortLink {
        ShortLink::new(self.code, self.destination, 0, self.created_at)
    }
}
