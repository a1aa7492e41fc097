//! Driving port for login use-cases.
//!
//! Inbound adapters call this port to check submitted credentials without
//! knowing where the accepted pair comes from.

use async_trait::async_trait;

use crate::domain::{LoginCredentials, LoginFailure};

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Accept or refuse the submitted credentials.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<(), LoginFailure>;
}

/// Authenticator backed by the single username/password pair from
/// application settings.
#[derive(Debug, Clone)]
pub struct ConfiguredLoginService {
    expected: LoginCredentials,
}

impl ConfiguredLoginService {
    /// Accept only `expected`.
    pub fn new(expected: LoginCredentials) -> Self {
        Self { expected }
    }
}

#[async_trait]
impl LoginService for ConfiguredLoginService {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<(), LoginFailure> {
        self.expected.verify(credentials).inspect_err(|failure| {
            tracing::info!(reason = %failure, "login refused");
        })
    }
}
