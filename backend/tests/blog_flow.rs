//! End-to-end request flows through the full middleware stack.
//!
//! Each test drives the real route table with cookie sessions, the trace
//! middleware and an in-memory entry store, carrying the session cookie from
//! response to request the way a browser would.

mod support;

use actix_web::body::MessageBody;
use actix_web::cookie::Key;
use actix_web::dev::ServiceResponse;
use actix_web::http::{StatusCode, header};
use actix_web::{App, test};
use flaskr::Trace;
use flaskr::domain::TRACE_ID_HEADER;
use flaskr::inbound::http::routes::configure;
use rstest::rstest;
use serde_json::Value;

use support::blog::{
    CookieJar, PASSWORD, USERNAME, blog_state, entry_form, login_form, session_middleware,
};

macro_rules! blog_app {
    () => {
        test::init_service(
            App::new()
                .app_data(blog_state())
                .wrap(session_middleware(Key::generate()))
                .wrap(Trace)
                .configure(configure),
        )
        .await
    };
}

macro_rules! send {
    ($app:expr, $jar:expr, $request:expr) => {{
        let response = test::call_service(&$app, $jar.attach($request).to_request()).await;
        $jar.update(&response);
        response
    }};
}

async fn body_text<B: MessageBody>(response: ServiceResponse<B>) -> String {
    let bytes = test::read_body(response).await;
    String::from_utf8(bytes.to_vec()).expect("utf-8 body")
}

#[rstest]
#[case(test::TestRequest::post().uri("/add").set_form(entry_form("Title", "Text")))]
#[case(test::TestRequest::get().uri("/search/?query=Title"))]
#[actix_web::test]
async fn gated_routes_answer_401_with_a_message(#[case] request: test::TestRequest) {
    let app = blog_app!();
    let mut jar = CookieJar::default();

    let response = send!(app, jar, request);

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let trace_id = response
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
        .expect("trace id header");
    let body: Value = test::read_body_json(response).await;
    assert!(
        body.get("message").and_then(Value::as_str).is_some(),
        "401 body carries a message: {body}"
    );
    assert_eq!(body.get("traceId").and_then(Value::as_str), Some(trace_id.as_str()));
}

#[actix_web::test]
async fn login_opens_and_logout_closes_the_gate() {
    let app = blog_app!();
    let mut jar = CookieJar::default();

    let response = send!(
        app,
        jar,
        test::TestRequest::post()
            .uri("/login")
            .set_form(login_form(USERNAME, PASSWORD))
    );
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers().get(header::LOCATION).and_then(|v| v.to_str().ok()),
        Some("/")
    );

    let index = body_text(send!(app, jar, test::TestRequest::get().uri("/"))).await;
    assert!(index.contains("You were logged in"));
    assert!(index.contains("class=\"add-entry\""));

    let searched = send!(app, jar, test::TestRequest::get().uri("/search/"));
    assert_eq!(searched.status(), StatusCode::OK);

    let response = send!(app, jar, test::TestRequest::get().uri("/logout"));
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let index = body_text(send!(app, jar, test::TestRequest::get().uri("/"))).await;
    assert!(index.contains("You were logged out"));
    assert!(!index.contains("class=\"add-entry\""));

    let response = send!(app, jar, test::TestRequest::get().uri("/search/"));
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[rstest]
#[case("adminx", PASSWORD, "Invalid username")]
#[case(USERNAME, "defaultx", "Invalid password")]
#[actix_web::test]
async fn bad_credentials_rerender_the_form_with_a_specific_error(
    #[case] username: &str,
    #[case] password: &str,
    #[case] message: &str,
) {
    let app = blog_app!();
    let mut jar = CookieJar::default();

    let response = send!(
        app,
        jar,
        test::TestRequest::post()
            .uri("/login")
            .set_form(login_form(username, password))
    );
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains(message));

    let response = send!(app, jar, test::TestRequest::get().uri("/search/"));
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn entry_titles_are_escaped_and_text_markup_is_kept() {
    let app = blog_app!();
    let mut jar = CookieJar::default();
    send!(
        app,
        jar,
        test::TestRequest::post()
            .uri("/login")
            .set_form(login_form(USERNAME, PASSWORD))
    );

    let empty = body_text(send!(app, jar, test::TestRequest::get().uri("/"))).await;
    assert!(empty.contains("No entries yet. Add some!"));

    let response = send!(
        app,
        jar,
        test::TestRequest::post()
            .uri("/add")
            .set_form(entry_form("<Hello>", "<strong>HTML</strong> allowed here"))
    );
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let listing = body_text(send!(app, jar, test::TestRequest::get().uri("/"))).await;
    assert!(listing.contains("&lt;Hello&gt;"));
    assert!(listing.contains("<strong>HTML</strong>"));
    assert!(listing.contains("New entry was successfully posted"));
    assert!(!listing.contains("No entries yet. Add some!"));
}

#[actix_web::test]
async fn search_matches_and_an_empty_query_shows_nothing() {
    let app = blog_app!();
    let mut jar = CookieJar::default();
    send!(
        app,
        jar,
        test::TestRequest::post()
            .uri("/login")
            .set_form(login_form(USERNAME, PASSWORD))
    );
    send!(
        app,
        jar,
        test::TestRequest::post()
            .uri("/add")
            .set_form(entry_form("Example Post", "Fake Content"))
    );

    let response = send!(app, jar, test::TestRequest::get().uri("/search/?query=example"));
    assert_eq!(response.status(), StatusCode::OK);
    let found = body_text(response).await;
    assert!(found.contains("Example Post"));
    assert!(found.contains("Fake Content"));

    let response = send!(app, jar, test::TestRequest::get().uri("/search/"));
    assert_eq!(response.status(), StatusCode::OK);
    let unfiltered = body_text(response).await;
    assert!(!unfiltered.contains("Example Post"));
    assert!(!unfiltered.contains("Fake Content"));
}

#[rstest]
#[case(true)]
#[case(false)]
#[actix_web::test]
async fn delete_reports_status_one_whether_or_not_the_entry_exists(#[case] seeded: bool) {
    let app = blog_app!();
    let mut jar = CookieJar::default();
    if seeded {
        send!(
            app,
            jar,
            test::TestRequest::post()
                .uri("/login")
                .set_form(login_form(USERNAME, PASSWORD))
        );
        send!(
            app,
            jar,
            test::TestRequest::post()
                .uri("/add")
                .set_form(entry_form("Doomed", "soon gone"))
        );
    }

    let response = send!(app, jar, test::TestRequest::get().uri("/delete/1"));
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body, serde_json::json!({ "status": 1 }));

    let listing = body_text(send!(app, jar, test::TestRequest::get().uri("/"))).await;
    assert!(!listing.contains("Doomed"));
    assert_eq!(listing.contains("The entry was deleted."), seeded);
}
