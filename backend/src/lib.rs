//! Flaskr: a single-author blog with session login.
//!
//! The library holds the domain, the Actix inbound adapter and the Diesel
//! outbound adapter; `main.rs` only wires them together.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
