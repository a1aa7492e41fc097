//! Route table for the blog.
//!
//! ```text
//! GET  /               index
//! GET  /login          login form
//! POST /login          login
//! GET  /logout         logout
//! POST /add            add entry        (login required)
//! GET  /delete/{id}    delete entry
//! GET  /search/        search entries   (login required)
//! ```

use actix_web::web;

use super::auth::{login, login_form, logout};
use super::entries::{add, delete, index, search};

/// Register the blog's handlers.
///
/// Requires a session middleware around the app and `web::Data<HttpState>`
/// in app data.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use flaskr::inbound::http::routes::configure;
///
/// let app = App::new().configure(configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(index)
        .service(login_form)
        .service(login)
        .service(logout)
        .service(add)
        .service(delete)
        .service(search);
}
