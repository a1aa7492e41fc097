//! Driven port for entry persistence plus an in-memory adapter.
//!
//! The in-memory adapter backs the server when no database URL is configured
//! and gives handler tests a real store without I/O.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::{Entry, EntryDraft, EntryId, SearchQuery};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by entry repository adapters.
    pub enum EntryRepositoryError {
        /// Repository connection could not be established.
        Connection => "entry repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query => "entry repository query failed: {message}",
    }
}

/// Storage for blog entries.
///
/// Every listing method returns entries most recent first.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EntryRepository: Send + Sync {
    /// All entries, most recent first.
    async fn list(&self) -> Result<Vec<Entry>, EntryRepositoryError>;

    /// Persist a draft and return the stored entry with its new id.
    async fn insert(&self, draft: &EntryDraft) -> Result<Entry, EntryRepositoryError>;

    /// Remove the entry with `id`. Returns whether a row was removed.
    async fn delete(&self, id: EntryId) -> Result<bool, EntryRepositoryError>;

    /// Entries whose title or text contains `query`, ignoring case, most
    /// recent first.
    async fn search(&self, query: &SearchQuery) -> Result<Vec<Entry>, EntryRepositoryError>;
}

#[derive(Debug, Default)]
struct InMemoryState {
    next_id: i32,
    entries: Vec<Entry>,
}

/// Process-local entry store guarded by a mutex.
///
/// Ids start at 1 and are never reused, matching a database sequence.
///
/// # Examples
/// ```
/// use flaskr::domain::ports::{EntryRepository, InMemoryEntryRepository};
/// use flaskr::domain::EntryDraft;
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let repo = InMemoryEntryRepository::default();
/// let draft = EntryDraft::new("Hello", "World").unwrap();
/// let entry = repo.insert(&draft).await.unwrap();
/// assert_eq!(entry.id().get(), 1);
/// # });
/// ```
#[derive(Debug, Default)]
pub struct InMemoryEntryRepository {
    state: Mutex<InMemoryState>,
}

impl InMemoryEntryRepository {
    fn with_state<R>(
        &self,
        f: impl FnOnce(&mut InMemoryState) -> R,
    ) -> Result<R, EntryRepositoryError> {
        let mut state = self
            .state
            .lock()
            .map_err(|_| EntryRepositoryError::connection("in-memory store lock poisoned"))?;
        Ok(f(&mut state))
    }
}

fn newest_first<'a>(entries: impl Iterator<Item = &'a Entry>) -> Vec<Entry> {
    let mut listed: Vec<Entry> = entries.cloned().collect();
    listed.sort_by(|a, b| b.id().cmp(&a.id()));
    listed
}

#[async_trait]
impl EntryRepository for InMemoryEntryRepository {
    async fn list(&self) -> Result<Vec<Entry>, EntryRepositoryError> {
        self.with_state(|state| newest_first(state.entries.iter()))
    }

    async fn insert(&self, draft: &EntryDraft) -> Result<Entry, EntryRepositoryError> {
        self.with_state(|state| {
            state.next_id += 1;
            let entry = draft.clone().into_entry(EntryId::new(state.next_id));
            state.entries.push(entry.clone());
            entry
        })
    }

    async fn delete(&self, id: EntryId) -> Result<bool, EntryRepositoryError> {
        self.with_state(|state| {
            let before = state.entries.len();
            state.entries.retain(|entry| entry.id() != id);
            state.entries.len() != before
        })
    }

    async fn search(&self, query: &SearchQuery) -> Result<Vec<Entry>, EntryRepositoryError> {
        self.with_state(|state| newest_first(state.entries.iter().filter(|e| query.matches(e))))
    }
}
