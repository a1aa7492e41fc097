//! In-memory blog wiring for the HTTP suites.
//!
//! Mirrors the production app: private cookie sessions named `session`, the
//! trace middleware outermost and the route table from
//! [`flaskr::inbound::http::routes::configure`].

use std::sync::Arc;

use actix_session::SessionMiddleware;
use actix_session::config::{CookieContentSecurity, PersistentSession};
use actix_session::storage::CookieSessionStore;
use actix_web::cookie::{Cookie, Key, SameSite, time::Duration as CookieDuration};
use actix_web::dev::ServiceResponse;
use actix_web::test::TestRequest;
use actix_web::web;

use flaskr::domain::LoginCredentials;
use flaskr::domain::ports::{ConfiguredLoginService, InMemoryEntryRepository};
use flaskr::inbound::http::pages::PageRenderer;
use flaskr::inbound::http::state::HttpState;

pub const USERNAME: &str = "admin";
pub const PASSWORD: &str = "default";
pub const SESSION_COOKIE: &str = "session";

/// Handler state over a fresh in-memory store.
pub fn blog_state() -> web::Data<HttpState> {
    let pages = PageRenderer::new().expect("templates compile");
    web::Data::new(HttpState::new(
        Arc::new(InMemoryEntryRepository::default()),
        Arc::new(ConfiguredLoginService::new(LoginCredentials::new(
            USERNAME, PASSWORD,
        ))),
        Arc::new(pages),
    ))
}

/// Session middleware configured like the server, minus the `Secure` flag.
pub fn session_middleware(key: Key) -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name(SESSION_COOKIE.to_owned())
        .cookie_path("/".to_owned())
        .cookie_secure(false)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_same_site(SameSite::Lax)
        .session_lifecycle(PersistentSession::default().session_ttl(CookieDuration::hours(2)))
        .build()
}

/// Form body for `POST /login`.
pub fn login_form(username: &str, password: &str) -> [(&'static str, String); 2] {
    [
        ("username", username.to_owned()),
        ("password", password.to_owned()),
    ]
}

/// Form body for `POST /add`.
pub fn entry_form(title: &str, text: &str) -> [(&'static str, String); 2] {
    [("title", title.to_owned()), ("text", text.to_owned())]
}

/// Carries the session cookie between in-process requests the way a browser
/// would.
#[derive(Default)]
pub struct CookieJar {
    session: Option<Cookie<'static>>,
}

impl CookieJar {
    /// Attach the current session cookie, if any.
    pub fn attach(&self, request: TestRequest) -> TestRequest {
        match &self.session {
            Some(cookie) => request.cookie(cookie.clone()),
            None => request,
        }
    }

    /// Remember whatever session cookie the response set.
    pub fn update<B>(&mut self, response: &ServiceResponse<B>) {
        let Some(cookie) = response
            .response()
            .cookies()
            .find(|cookie| cookie.name() == SESSION_COOKIE)
        else {
            return;
        };
        self.session = (!cookie.value().is_empty()).then(|| cookie.into_owned());
    }
}
