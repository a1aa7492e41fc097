//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::EntryService;
use crate::domain::ports::{EntryRepository, LoginService};
use crate::inbound::http::pages::PageRenderer;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub entries: EntryService,
    pub login: Arc<dyn LoginService>,
    pub pages: Arc<PageRenderer>,
}

impl HttpState {
    /// Construct state from the port implementations chosen at startup.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use flaskr::domain::LoginCredentials;
    /// use flaskr::domain::ports::{ConfiguredLoginService, InMemoryEntryRepository};
    /// use flaskr::inbound::http::pages::PageRenderer;
    /// use flaskr::inbound::http::state::HttpState;
    ///
    /// let state = HttpState::new(
    ///     Arc::new(InMemoryEntryRepository::default()),
    ///     Arc::new(ConfiguredLoginService::new(LoginCredentials::new("admin", "admin"))),
    ///     Arc::new(PageRenderer::new().expect("templates compile")),
    /// );
    /// let _entries = state.entries.clone();
    /// ```
    pub fn new(
        repository: Arc<dyn EntryRepository>,
        login: Arc<dyn LoginService>,
        pages: Arc<PageRenderer>,
    ) -> Self {
        Self {
            entries: EntryService::new(repository),
            login,
            pages,
        }
    }
}
