//! HTML pages rendered with Handlebars.
//!
//! Templates are compiled into the binary and registered once at startup.
//! `{{title}}` escapes HTML while `{{{text}}}` passes the author's markup
//! through untouched.

use actix_web::HttpResponse;
use actix_web::http::header::{self, ContentType};
use handlebars::Handlebars;
use serde::Serialize;

use crate::domain::{Entry, Error};
use crate::inbound::http::session::SessionContext;

const HEADER: &str = include_str!("../../../templates/header.hbs");
const FOOTER: &str = include_str!("../../../templates/footer.hbs");
const INDEX: &str = include_str!("../../../templates/index.hbs");
const LOGIN: &str = include_str!("../../../templates/login.hbs");
const SEARCH: &str = include_str!("../../../templates/search.hbs");

/// Failure to compile a bundled template.
#[derive(Debug, thiserror::Error)]
#[error("failed to register template {name}: {source}")]
pub struct PageError {
    name: &'static str,
    #[source]
    source: Box<handlebars::TemplateError>,
}

/// Context shared by every page.
#[derive(Debug, Default, Serialize)]
pub struct Layout {
    pub logged_in: bool,
    pub flashes: Vec<String>,
}

impl Layout {
    /// Login state and pending flashes for the current session.
    ///
    /// Consumes the flashes: they are shown exactly once.
    pub fn from_session(session: &SessionContext) -> Self {
        Self {
            logged_in: session.is_logged_in(),
            flashes: session.take_flashes(),
        }
    }
}

/// `303 See Other` pointing at `location`.
pub fn see_other(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

/// Data for the entry listing.
#[derive(Debug, Serialize)]
pub struct IndexPage<'a> {
    #[serde(flatten)]
    pub layout: Layout,
    pub entries: &'a [Entry],
}

/// Data for the login form.
#[derive(Debug, Serialize)]
pub struct LoginPage<'a> {
    #[serde(flatten)]
    pub layout: Layout,
    pub error: Option<&'a str>,
    pub username: &'a str,
}

/// Data for the search form and its results.
#[derive(Debug, Serialize)]
pub struct SearchPage<'a> {
    #[serde(flatten)]
    pub layout: Layout,
    pub query: &'a str,
    pub searched: bool,
    pub entries: &'a [Entry],
}

/// Renders the blog's HTML pages.
pub struct PageRenderer {
    handlebars: Handlebars<'static>,
}

impl PageRenderer {
    /// Compile the bundled templates.
    pub fn new() -> Result<Self, PageError> {
        let mut handlebars = Handlebars::new();
        for (name, source) in [("header", HEADER), ("footer", FOOTER)] {
            handlebars
                .register_partial(name, source)
                .map_err(|err| PageError {
                    name,
                    source: Box::new(err),
                })?;
        }
        for (name, source) in [("index", INDEX), ("login", LOGIN), ("search", SEARCH)] {
            handlebars
                .register_template_string(name, source)
                .map_err(|err| PageError {
                    name,
                    source: Box::new(err),
                })?;
        }
        Ok(Self { handlebars })
    }

    /// Render the entry listing.
    pub fn index(&self, page: &IndexPage<'_>) -> Result<HttpResponse, Error> {
        self.render("index", page)
    }

    /// Render the login form.
    pub fn login(&self, page: &LoginPage<'_>) -> Result<HttpResponse, Error> {
        self.render("login", page)
    }

    /// Render the search page.
    pub fn search(&self, page: &SearchPage<'_>) -> Result<HttpResponse, Error> {
        self.render("search", page)
    }

    fn render<T: Serialize>(&self, name: &str, data: &T) -> Result<HttpResponse, Error> {
        let body = self
            .handlebars
            .render(name, data)
            .map_err(|err| Error::internal(format!("failed to render {name}: {err}")))?;
        Ok(HttpResponse::Ok()
            .content_type(ContentType::html())
            .body(body))
    }
}
