//! HTTP inbound adapter: HTML pages, the login gate and JSON endpoints.

pub mod auth;
pub mod entries;
pub mod error;
pub mod gate;
pub mod health;
pub mod pages;
pub mod routes;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;

pub use error::ApiResult;
