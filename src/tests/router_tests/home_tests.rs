// src/tests/router_tests/home_tests.rs
use crate::errors::ServerError;
use crate::responses::html_error_response;
use crate::router::handle;
use crate::tests::utils::{body_string, offline_app, request};
use http::Method;

#[test]
fn home_renders_both_forms() {
    let app = offline_app();

    let mut resp = handle(request(Method::GET, "/", ""), &app).unwrap();

    assert_eq!(resp.status(), 200);
    let body = body_string(&mut resp);
    assert!(body.contains(r#"action="/search-trulia""#));
    assert!(body.contains(r#"action="/search-google""#));
}

#[test]
fn health_is_ok() {
    let app = offline_app();

    let mut resp = handle(request(Method::GET, "/health", ""), &app).unwrap();

    assert_eq!(resp.status(), 200);
    assert_eq!(body_string(&mut resp), "ok");
}

#[test]
fn unknown_route_is_not_found() {
    let app = offline_app();

    let err = handle(request(Method::GET, "/listings.xlsx", ""), &app).unwrap_err();
    assert!(matches!(err, ServerError::NotFound));

    let resp = html_error_response(err);
    assert_eq!(resp.status(), 404);
}

#[test]
fn get_on_search_route_is_not_found() {
    let app = offline_app();

    let err = handle(request(Method::GET, "/search-trulia", ""), &app).unwrap_err();
    assert!(matches!(err, ServerError::NotFound));
}
