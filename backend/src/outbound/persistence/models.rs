//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain.

use diesel::prelude::*;

use crate::domain::{Entry, EntryId};

use super::schema::entries;

/// Row struct for reading from the entries table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = entries)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct EntryRow {
    pub id: i32,
    pub title: String,
    pub text: String,
}

impl From<EntryRow> for Entry {
    fn from(row: EntryRow) -> Self {
        Entry::new(EntryId::new(row.id), row.title, row.text)
    }
}

/// Insertable struct for new entries; the id comes from the sequence.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = entries)]
pub(crate) struct NewEntryRow<'a> {
    pub title: &'a str,
    pub text: &'a str,
}
