//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::{LinkService, RedirectService};
use crate::domain::repositories::LinkRepository;
use crate::utils::code_generator::CodeGenerator;

#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService>,
    pub redirect_service: Arc<RedirectService>,
    /// Prefix used to build `short_url`, without trailing slash.
    pub base_url: Arc<str>,
}

impl AppState {
    /// Wires both services to one repository.
    pub fn new(
        repository: Arc<dyn LinkRepository>,
        generator: Arc<dyn CodeGenerator>,
        max_attempts: usize,
        base_url: &str,
    ) -> Self {
        Self {
            link_service: Arc::new(LinkService::new(
                repository.clone(),
                generator,
                max_attempts,
            )),
            redirect_service: Arc::new(RedirectService::new(repository)),
            base_url: Arc::from(base_url.trim_end_matches('/')),
        }
    }

    /// Builds the public short URL for a code.
    pub fn short_url(&self, code: &str) -> String {
        format!("{}/{}", self.base_url, code)
    }
}
