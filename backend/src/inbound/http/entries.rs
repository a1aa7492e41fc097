//! Entry handlers: listing, posting, deleting and searching.
//!
//! ```text
//! GET  /                 listing, newest first
//! POST /add              title=...&text=...          (login required)
//! GET  /delete/{id}      {"status":1}
//! GET  /search/?query=x  filtered listing             (login required)
//! ```

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::warn;

use crate::domain::{EntryDraft, EntryId, EntryValidationError, Error, SearchQuery};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::public_view;
use crate::inbound::http::gate::LoginRequired;
use crate::inbound::http::pages::{IndexPage, Layout, SearchPage, see_other};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Form body for `POST /add`.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct EntryForm {
    pub title: String,
    #[serde(default)]
    pub text: String,
}

/// Query string for `GET /search/`.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub query: Option<String>,
}

/// Outcome of `GET /delete/{id}`.
///
/// `{"status":1}` on success, `{"status":0,"message":"..."}` when the store
/// failed.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, utoipa::ToSchema)]
pub struct DeleteStatus {
    pub status: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl DeleteStatus {
    fn done() -> Self {
        Self {
            status: 1,
            message: None,
        }
    }

    fn failed(error: &Error) -> Self {
        Self {
            status: 0,
            message: Some(public_view(error).message().to_owned()),
        }
    }
}

fn map_entry_validation_error(err: EntryValidationError) -> Error {
    match err {
        EntryValidationError::EmptyTitle => Error::invalid_request("title must not be empty")
            .with_details(json!({ "field": "title", "code": "empty_title" })),
    }
}

/// List every entry.
#[get("/")]
pub async fn index(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let entries = state.entries.list().await?;
    state.pages.index(&IndexPage {
        layout: Layout::from_session(&session),
        entries: &entries,
    })
}

/// Post a new entry.
#[utoipa::path(
    post,
    path = "/add",
    request_body(content = EntryForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Entry stored; redirect to the listing"),
        (status = 400, description = "Blank title", body = Error),
        (status = 401, description = "Not logged in", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["entries"],
    operation_id = "addEntry"
)]
#[post("/add", wrap = "LoginRequired")]
pub async fn add(
    state: web::Data<HttpState>,
    session: SessionContext,
    form: web::Form<EntryForm>,
) -> ApiResult<HttpResponse> {
    let EntryForm { title, text } = form.into_inner();
    let draft = EntryDraft::new(title, text).map_err(map_entry_validation_error)?;
    state.entries.add(draft).await?;
    session.flash("New entry was successfully posted")?;
    Ok(see_other("/"))
}

/// Delete an entry by id.
///
/// Deleting an id that does not exist still reports success.
#[utoipa::path(
    get,
    path = "/delete/{id}",
    params(("id" = String, Path, description = "Entry identifier; integers outside the id range match nothing")),
    responses(
        (status = 200, description = "Entry removed or absent", body = DeleteStatus),
        (status = 404, description = "Identifier is not an integer"),
        (status = 500, description = "Entry store failure", body = DeleteStatus)
    ),
    tags = ["entries"],
    operation_id = "deleteEntry"
)]
#[get("/delete/{id}")]
pub async fn delete(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> HttpResponse {
    let id = match DeleteTarget::parse(&path) {
        DeleteTarget::Entry(id) => id,
        DeleteTarget::OutOfRange => return HttpResponse::Ok().json(DeleteStatus::done()),
        DeleteTarget::Malformed => return HttpResponse::NotFound().finish(),
    };
    match delete_entry(&state, &session, id).await {
        Ok(()) => HttpResponse::Ok().json(DeleteStatus::done()),
        Err(error) => {
            warn!(entry_id = %id, error = %error, "entry delete failed");
            HttpResponse::build(StatusCode::INTERNAL_SERVER_ERROR).json(DeleteStatus::failed(&error))
        }
    }
}

/// Path segment of `GET /delete/{id}`.
#[derive(Debug, PartialEq, Eq)]
enum DeleteTarget {
    Entry(EntryId),
    /// An integer no stored entry can carry.
    OutOfRange,
    Malformed,
}

impl DeleteTarget {
    fn parse(raw: &str) -> Self {
        let digits = raw.strip_prefix('-').unwrap_or(raw);
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Self::Malformed;
        }
        raw.parse::<i32>()
            .map_or(Self::OutOfRange, |id| Self::Entry(EntryId::new(id)))
    }
}

async fn delete_entry(state: &HttpState, session: &SessionContext, id: EntryId) -> ApiResult<()> {
    // Anonymous callers get no flash, and so no session cookie.
    if state.entries.delete(id).await? && session.is_logged_in() {
        session.flash("The entry was deleted.")?;
    }
    Ok(())
}

/// Search entries by title or text.
#[utoipa::path(
    get,
    path = "/search/",
    params(("query" = Option<String>, Query, description = "Case-insensitive substring")),
    responses(
        (status = 200, description = "HTML search page"),
        (status = 401, description = "Not logged in", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["entries"],
    operation_id = "searchEntries"
)]
#[get("/search/", wrap = "LoginRequired")]
pub async fn search(
    state: web::Data<HttpState>,
    session: SessionContext,
    params: web::Query<SearchParams>,
) -> ApiResult<HttpResponse> {
    let raw = params.query.as_deref();
    let query = SearchQuery::parse(raw);
    let entries = state.entries.search(query.as_ref()).await?;
    state.pages.search(&SearchPage {
        layout: Layout::from_session(&session),
        query: raw.unwrap_or_default(),
        searched: query.is_some(),
        entries: &entries,
    })
}
