// src/tests/router_tests/search_tests.rs
use crate::errors::ServerError;
use crate::responses::html_error_response;
use crate::router::handle;
use crate::scrape::ScrapeError;
use crate::tests::utils::{body_string, offline_app, request};
use http::Method;

#[test]
fn listing_search_requires_city_and_state() {
    let app = offline_app();

    let err = handle(
        request(Method::POST, "/search-trulia", "city=Austin&state=+"),
        &app,
    )
    .unwrap_err();

    assert!(matches!(err, ServerError::BadRequest(ref msg) if msg.contains("state")));
    assert_eq!(html_error_response(err).status(), 400);
}

#[test]
fn web_search_requires_a_question() {
    let app = offline_app();

    let err = handle(request(Method::POST, "/search-google", ""), &app).unwrap_err();

    assert!(matches!(err, ServerError::BadRequest(_)));
}

#[test]
fn listing_search_without_credentials_renders_an_error_page() {
    let app = offline_app();

    let err = handle(
        request(Method::POST, "/search-trulia", "city=Austin&state=TX"),
        &app,
    )
    .unwrap_err();
    assert!(matches!(err, ServerError::Config(_)));

    let mut resp = html_error_response(err);
    assert_eq!(resp.status(), 500);
    let body = body_string(&mut resp);
    assert!(body.contains("Error 500"));
    assert!(!body.contains("<table"));
}

#[test]
fn web_search_without_credentials_is_a_config_error() {
    let app = offline_app();

    let err = handle(
        request(Method::POST, "/search-google", "question=homes+in+austin"),
        &app,
    )
    .unwrap_err();

    assert!(matches!(err, ServerError::Config(_)));
}

#[test]
fn scrape_errors_map_to_statuses() {
    let upstream: ServerError = ScrapeError::Navigation("HTTP 503".into()).into();
    assert_eq!(upstream.status(), 502);

    let config: ServerError = ScrapeError::Config("missing key".into()).into();
    assert_eq!(config.status(), 500);

    let session: ServerError = ScrapeError::Session("unreachable".into()).into();
    assert!(matches!(session, ServerError::Upstream(ref m) if m.contains("unreachable")));
}

#[test]
fn error_page_escapes_messages() {
    let mut resp = html_error_response(ServerError::BadRequest("<script>x</script>".into()));
    let body = body_string(&mut resp);

    assert!(!body.contains("<script>x</script>"));
    assert!(body.contains("&lt;script&gt;"));
}
