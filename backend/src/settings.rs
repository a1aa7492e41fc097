//! Application settings loaded via OrthoConfig.
//!
//! Values come from CLI flags, `FLASKR_*` environment variables or a config
//! file. Every field is optional; the accessors apply the defaults.

use std::net::SocketAddr;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::LoginCredentials;

const DEFAULT_USERNAME: &str = "admin";
const DEFAULT_PASSWORD: &str = "admin";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:5000";

/// Settings for the blog server.
#[derive(Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "FLASKR")]
pub struct AppSettings {
    /// Author login name.
    pub username: Option<String>,
    /// Author password.
    pub password: Option<String>,
    /// PostgreSQL URL. Entries are kept in memory when unset.
    pub database_url: Option<String>,
    /// Listen address, `host:port`.
    pub bind_addr: Option<String>,
    /// Upper bound on pooled database connections.
    pub pool_max_size: Option<u32>,
}

impl std::fmt::Debug for AppSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppSettings")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("database_url", &self.database_url.as_ref().map(|_| "<redacted>"))
            .field("bind_addr", &self.bind_addr)
            .field("pool_max_size", &self.pool_max_size)
            .finish()
    }
}

/// Invalid setting value.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// Layered sources could not be merged or parsed.
    #[error("failed to load settings: {message}")]
    Load { message: String },
    /// `bind_addr` is not a socket address.
    #[error("invalid bind address '{value}': {source}")]
    BindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
}

impl AppSettings {
    /// Merge CLI arguments (program name first), `FLASKR_*` variables and any
    /// config file.
    pub fn from_args<I, T>(args: I) -> Result<Self, SettingsError>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::load_from_iter(args).map_err(|err| SettingsError::Load {
            message: err.to_string(),
        })
    }

    /// The single accepted login.
    pub fn credentials(&self) -> LoginCredentials {
        LoginCredentials::new(
            self.username.as_deref().unwrap_or(DEFAULT_USERNAME),
            self.password.as_deref().unwrap_or(DEFAULT_PASSWORD),
        )
    }

    /// Configured database URL, if persistence is enabled.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
    }

    /// Socket address to bind.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value.parse().map_err(|source| SettingsError::BindAddr {
            value: value.to_owned(),
            source,
        })
    }
}
