//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Provides the `entries` table adapter for the domain's `EntryRepository`
//! port, backed by `diesel-async` with `bb8` connection pooling, plus the
//! embedded migrations applied at startup.
//!
//! Row structs (`models.rs`) and table definitions (`schema.rs`) are internal
//! and never reach the domain layer.
//!
//! # Example
//!
//! ```ignore
//! use flaskr::outbound::persistence::{DbPool, DieselEntryRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/flaskr")).await?;
//! let repo = DieselEntryRepository::new(pool);
//! ```

mod diesel_basic_error_mapping;
mod diesel_entry_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_entry_repository::DieselEntryRepository;
pub use migrations::{MigrationError, run_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
