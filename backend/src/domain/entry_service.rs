//! Entry use-cases shared by the HTTP handlers.
//!
//! The service owns the translation from repository failures to domain
//! errors so handlers only deal with [`Error`].

use std::sync::Arc;

use tracing::{error, info};

use super::ports::{EntryRepository, EntryRepositoryError};
use super::{Entry, EntryDraft, EntryId, Error, SearchQuery};

/// Map repository errors to client-facing domain errors.
fn map_repository_error(err: EntryRepositoryError) -> Error {
    error!(error = %err, "entry repository failure");
    match err {
        EntryRepositoryError::Connection { .. } => {
            Error::service_unavailable("entry store unavailable")
        }
        EntryRepositoryError::Query { .. } => Error::internal(err.to_string()),
    }
}

/// Listing, posting, deleting and searching entries.
#[derive(Clone)]
pub struct EntryService {
    repository: Arc<dyn EntryRepository>,
}

impl EntryService {
    /// Build the service over a repository adapter.
    pub fn new(repository: Arc<dyn EntryRepository>) -> Self {
        Self { repository }
    }

    /// All entries, most recent first.
    pub async fn list(&self) -> Result<Vec<Entry>, Error> {
        self.repository.list().await.map_err(map_repository_error)
    }

    /// Store a new entry.
    pub async fn add(&self, draft: EntryDraft) -> Result<Entry, Error> {
        let entry = self
            .repository
            .insert(&draft)
            .await
            .map_err(map_repository_error)?;
        info!(entry_id = %entry.id(), "entry posted");
        Ok(entry)
    }

    /// Remove an entry. A missing id is not an error; the return value says
    /// whether anything was removed.
    pub async fn delete(&self, id: EntryId) -> Result<bool, Error> {
        let removed = self
            .repository
            .delete(id)
            .await
            .map_err(map_repository_error)?;
        info!(entry_id = %id, removed, "entry delete requested");
        Ok(removed)
    }

    /// Entries matching `query`. Without a query nothing is searched and the
    /// result is empty.
    pub async fn search(&self, query: Option<&SearchQuery>) -> Result<Vec<Entry>, Error> {
        match query {
            Some(query) => self
                .repository
                .search(query)
                .await
                .map_err(map_repository_error),
            None => Ok(Vec::new()),
        }
    }
}
