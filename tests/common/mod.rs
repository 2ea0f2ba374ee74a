#![allow(dead_code)]

use async_trait::async_trait;
use axum::Router;
use axum_test::TestServer;
use shortlink::domain::entities::{NewShortLink, ShortLink};
use shortlink::domain::repositories::{LinkRepository, StoreError, StoreResult};
use shortlink::infrastructure::persistence::InMemoryLinkRepository;
use shortlink::routes::app_router;
use shortlink::state::AppState;
use shortlink::utils::code_generator::{CodeGenerator, RandomCodeGenerator};
use std::sync::Arc;
use std::time::Duration;

pub const BASE_URL: &str = "https://s.example.com";
pub const MAX_ATTEMPTS: usize = 10;

/// Generator that always returns the same code.
pub struct FixedCodeGenerator(pub &'static str);

impl CodeGenerator for FixedCodeGenerator {
    fn generate(&self) -> String {
        self.0.to_string()
    }
}

/// Store whose every call fails as if the database were down.
pub struct UnavailableRepository;

#[async_trait]
impl LinkRepository for UnavailableRepository {
    async fn exists(&self, _code: &str) -> StoreResult<bool> {
        Err(StoreError::Unavailable("connection refused".into()))
    }

    async fn insert(&self, _new_link: NewShortLink) -> StoreResult<ShortLink> {
        Err(StoreError::Unavailable("connection refused".into()))
    }

    async fn get_and_increment(&self, _code: &str) -> StoreResult<Option<ShortLink>> {
        Err(StoreError::Unavailable("connection refused".into()))
    }

    async fn get(&self, _code: &str) -> StoreResult<Option<ShortLink>> {
        Err(StoreError::Unavailable("connection refused".into()))
    }

    async fn health_check(&self) -> StoreResult<()> {
        Err(StoreError::Unavailable("connection refused".into()))
    }
}

pub fn create_test_state(
    repository: Arc<dyn LinkRepository>,
    generator: Arc<dyn CodeGenerator>,
) -> AppState {
    AppState::new(repository, generator, MAX_ATTEMPTS, BASE_URL)
}

/// Full router over a fresh in-memory store, plus a handle on the store.
pub fn create_test_app() -> (Router, Arc<InMemoryLinkRepository>) {
    let repository = Arc::new(InMemoryLinkRepository::new());
    let state = create_test_state(repository.clone(), Arc::new(RandomCodeGenerator::default()));
    (app_router(state, Duration::from_secs(5)), repository)
}

pub fn create_test_server() -> (TestServer, Arc<InMemoryLinkRepository>) {
    let (app, repository) = create_test_app();
    (TestServer::new(app).unwrap(), repository)
}

/// Inserts a link directly, bypassing the allocation loop.
pub async fn create_test_link(repository: &InMemoryLinkRepository, code: &str, url: &str) {
    repository
        .insert(NewShortLink::now(code.to_string(), url.to_string()))
        .await
        .unwrap();
}
