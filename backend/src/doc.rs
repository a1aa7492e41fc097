//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] covers the endpoints that answer with JSON: the gated entry
//! routes (whose `401` body is the error envelope), delete and the health
//! probes. HTML-only pages are left out. Swagger UI serves it at `/docs` in
//! debug builds and `openapi-dump` prints it.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{Error, ErrorCode};
use crate::inbound::http::entries::{DeleteStatus, EntryForm};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /login.",
            ))),
        );
    }
}

/// OpenAPI document for the blog's JSON surface.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Flaskr",
        description = "Single-author blog with session login."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::entries::add,
        crate::inbound::http::entries::delete,
        crate::inbound::http::entries::search,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(Error, ErrorCode, DeleteStatus, EntryForm)),
    tags(
        (name = "entries", description = "Posting, deleting and searching entries"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
