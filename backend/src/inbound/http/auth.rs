//! Login and logout handlers.
//!
//! ```text
//! GET  /login   login form
//! POST /login   username=admin&password=admin
//! GET  /logout
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::Deserialize;

use crate::domain::LoginCredentials;
use crate::inbound::http::ApiResult;
use crate::inbound::http::pages::{Layout, LoginPage, see_other};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Form body for `POST /login`.
#[derive(Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Show the login form.
#[get("/login")]
pub async fn login_form(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    state.pages.login(&LoginPage {
        layout: Layout::from_session(&session),
        error: None,
        username: "",
    })
}

/// Check the submitted credentials and start a session.
///
/// A refused login re-renders the form with the reason; the session is left
/// untouched.
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    form: web::Form<LoginForm>,
) -> ApiResult<HttpResponse> {
    let LoginForm { username, password } = form.into_inner();
    let credentials = LoginCredentials::new(username, password);
    match state.login.authenticate(&credentials).await {
        Ok(()) => {
            session.log_in()?;
            session.flash("You were logged in")?;
            Ok(see_other("/"))
        }
        Err(failure) => {
            let reason = failure.to_string();
            state.pages.login(&LoginPage {
                layout: Layout::from_session(&session),
                error: Some(&reason),
                username: credentials.username(),
            })
        }
    }
}

/// End the session. Safe to call when not logged in.
#[get("/logout")]
pub async fn logout(session: SessionContext) -> ApiResult<HttpResponse> {
    session.log_out();
    session.flash("You were logged out")?;
    Ok(see_other("/"))
}
