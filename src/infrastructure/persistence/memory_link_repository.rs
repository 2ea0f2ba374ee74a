//! In-memory implementation of link repository.

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use crate::domain::entities::{NewShortLink, ShortLink};
use crate::domain::repositories::{LinkRepository, StoreError, StoreResult};

/// Process-local link store backed by a sharded `DashMap`.
///
/// Honors the same atomicity contracts as [`super::PgLinkRepository`]:
/// insert goes through the entry API, so a duplicate code is rejected while
/// the shard lock is held, and increments mutate the record under the same
/// lock that produces the returned copy.
///
/// State lives only as long as the process and is not shared between
/// instances, so this backs tests rather than deployments.
#[derive(Debug, Default)]
pub struct InMemoryLinkRepository {
    storage: DashMap<String, ShortLink>,
}

impl InMemoryLinkRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored links.
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }
}

#[async_trait]
impl LinkRepository for InMemoryLinkRepository {
    async fn exists(&self, code: &str) -> StoreResult<bool> {
        Ok(self.storage.contains_key(code))
    }

    async fn insert(&self, new_link: NewShortLink) -> StoreResult<ShortLink> {
        match self.storage.entry(new_link.code.clone()) {
            Entry::Occupied(_) => Err(StoreError::DuplicateKey(new_link.code)),
            Entry::Vacant(slot) => {
                let link = new_link.into_link();
                slot.insert(link.clone());
                Ok(link)
            }
        }
    }

    async fn get_and_increment(&self, code: &str) -> StoreResult<Option<ShortLink>> {
        Ok(self.storage.get_mut(code).map(|mut link| {
            link.visit_count += 1;
            link.value().clone()
        }))
    }

    async fn get(&self, code: &str) -> StoreResult<Option<ShortLink>> {
        Ok(self.storage.get(code).map(|link| link.value().clone()))
    }

    async fn health_check(&self) -> StoreResult<()> {
        Ok(())
    }
}
