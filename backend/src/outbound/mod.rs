//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! Currently only **persistence**: the PostgreSQL-backed entry repository
//! using Diesel ORM. Adapters translate between domain types and rows and
//! contain no business logic.

pub mod persistence;
