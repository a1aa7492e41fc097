//! Diesel table definitions for the PostgreSQL schema.
//!
//! Must match `backend/migrations` exactly; regenerate with
//! `diesel print-schema` when a migration changes the table.

diesel::table! {
    /// Blog entries, newest has the highest id.
    entries (id) {
        /// Serial primary key assigned on insert.
        id -> Int4,
        /// Plain-text title, escaped when rendered.
        title -> Text,
        /// Entry body, rendered verbatim.
        text -> Text,
    }
}
