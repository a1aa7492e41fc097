//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod entry_repository;
mod login_service;

#[cfg(test)]
pub use entry_repository::MockEntryRepository;
pub use entry_repository::{EntryRepository, EntryRepositoryError, InMemoryEntryRepository};
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::{ConfiguredLoginService, LoginService};
