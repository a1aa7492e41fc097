//! PostgreSQL-backed `EntryRepository` implementation using Diesel ORM.
//!
//! Listing and search return rows ordered by descending id. Search uses
//! `ILIKE` with the user's needle escaped so `%`, `_` and `\` match
//! literally.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{EntryRepository, EntryRepositoryError};
use crate::domain::{Entry, EntryDraft, EntryId, SearchQuery};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{EntryRow, NewEntryRow};
use super::pool::{DbPool, PoolError};
use super::schema::entries;

/// Diesel-backed implementation of the `EntryRepository` port.
#[derive(Clone)]
pub struct DieselEntryRepository {
    pool: DbPool,
}

impl DieselEntryRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> EntryRepositoryError {
    map_basic_pool_error(error, EntryRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> EntryRepositoryError {
    map_basic_diesel_error(
        error,
        EntryRepositoryError::query,
        EntryRepositoryError::connection,
    )
}

/// `%needle%` with LIKE metacharacters escaped.
fn contains_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for ch in needle.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

fn into_entries(rows: Vec<EntryRow>) -> Vec<Entry> {
    rows.into_iter().map(Entry::from).collect()
}

#[async_trait]
impl EntryRepository for DieselEntryRepository {
    async fn list(&self) -> Result<Vec<Entry>, EntryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        entries::table
            .order(entries::id.desc())
            .select(EntryRow::as_select())
            .load(&mut conn)
            .await
            .map(into_entries)
            .map_err(map_diesel_error)
    }

    async fn insert(&self, draft: &EntryDraft) -> Result<Entry, EntryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewEntryRow {
            title: draft.title(),
            text: draft.text(),
        };
        diesel::insert_into(entries::table)
            .values(&row)
            .returning(EntryRow::as_returning())
            .get_result(&mut conn)
            .await
            .map(Entry::from)
            .map_err(map_diesel_error)
    }

    async fn delete(&self, id: EntryId) -> Result<bool, EntryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let removed = diesel::delete(entries::table.filter(entries::id.eq(id.get())))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(removed > 0)
    }

    async fn search(&self, query: &SearchQuery) -> Result<Vec<Entry>, EntryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let pattern = contains_pattern(query.as_str());
        entries::table
            .filter(
                entries::title
                    .ilike(pattern.as_str())
                    .or(entries::text.ilike(pattern.as_str())),
            )
            .order(entries::id.desc())
            .select(EntryRow::as_select())
            .load(&mut conn)
            .await
            .map(into_entries)
            .map_err(map_diesel_error)
    }
}
