//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! Wraps the Actix cookie session so handlers deal with the login flag and
//! flash messages rather than raw keys.

use actix_session::{Session, SessionExt};
use actix_web::dev::{Payload, ServiceRequest};
use actix_web::{FromRequest, HttpRequest};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

use crate::domain::Error;

pub(crate) const LOGGED_IN_KEY: &str = "logged_in";
pub(crate) const FLASHES_KEY: &str = "_flashes";

/// Message returned when a gated route is hit without a login.
pub const LOGIN_REQUIRED_MESSAGE: &str = "Please log in.";

/// Newtype wrapper exposing the blog's session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Wrap an Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Session for a request still travelling through middleware.
    pub fn from_service_request(req: &ServiceRequest) -> Self {
        Self(req.get_session())
    }

    /// Whether the client has logged in.
    ///
    /// A cookie whose flag cannot be decoded is treated as anonymous.
    pub fn is_logged_in(&self) -> bool {
        match self.0.get::<bool>(LOGGED_IN_KEY) {
            Ok(flag) => flag.unwrap_or(false),
            Err(error) => {
                warn!(%error, "unreadable login flag in session cookie");
                false
            }
        }
    }

    /// Require a logged-in session or return `401 Unauthorized`.
    pub fn require_login(&self) -> Result<(), Error> {
        if self.is_logged_in() {
            Ok(())
        } else {
            Err(Error::unauthorized(LOGIN_REQUIRED_MESSAGE))
        }
    }

    /// Mark the session as logged in.
    pub fn log_in(&self) -> Result<(), Error> {
        self.0.renew();
        self.0
            .insert(LOGGED_IN_KEY, true)
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Drop the login flag. Logging out an anonymous session is a no-op.
    pub fn log_out(&self) {
        self.0.remove(LOGGED_IN_KEY);
    }

    /// Queue a message for the next rendered page.
    pub fn flash(&self, message: impl Into<String>) -> Result<(), Error> {
        let mut queued = self.peek_flashes();
        queued.push(message.into());
        self.0
            .insert(FLASHES_KEY, queued)
            .map_err(|error| Error::internal(format!("failed to persist flash: {error}")))
    }

    /// Remove and return all queued messages, oldest first.
    pub fn take_flashes(&self) -> Vec<String> {
        match self.0.remove_as::<Vec<String>>(FLASHES_KEY) {
            Some(Ok(messages)) => messages,
            Some(Err(raw)) => {
                warn!(raw = %raw, "discarding unreadable flash messages");
                Vec::new()
            }
            None => Vec::new(),
        }
    }

    fn peek_flashes(&self) -> Vec<String> {
        self.0
            .get::<Vec<String>>(FLASHES_KEY)
            .ok()
            .flatten()
            .unwrap_or_default()
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}
