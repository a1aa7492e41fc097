//! Domain primitives, ports and use-cases.
//!
//! Purpose: keep the blog's rules (who may post, what an entry is, how search
//! matches) independent of Actix and Diesel. Inbound and outbound adapters
//! depend on this module, never the other way round.
//!
//! Public surface:
//! - `Error`/`ErrorCode`: transport-agnostic error payload.
//! - `Entry`, `EntryDraft`, `EntryId`, `SearchQuery`: blog entries and search.
//! - `LoginCredentials`/`LoginFailure`: the single-author login check.
//! - `EntryService`: entry use-cases over the `EntryRepository` port.

pub mod auth;
pub mod entry;
pub mod entry_service;
pub mod error;
pub mod ports;
pub mod trace_id;

pub use self::auth::{LoginCredentials, LoginFailure};
pub use self::entry::{Entry, EntryDraft, EntryId, EntryValidationError, SearchQuery};
pub use self::entry_service::EntryService;
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::trace_id::TraceId;
