use crate::errors::ServerError;
use crate::templates::pages::error_page;
use astra::{Body, Response, ResponseBuilder};

pub type ResultResp = Result<Response, ServerError>;

/// Turns a handler failure into a full error page. Never a partial result.
pub fn html_error_response(err: ServerError) -> Response {
    let status = err.status();
    let message = match &err {
        // keep internals out of the page
        ServerError::Config(_) => "The server is missing scraping credentials.".to_string(),
        other => other.to_string(),
    };
    let body = error_page(status, &message).into_string();

    ResponseBuilder::new()
        .status(status)
        .header("Content-Type", "text/html; charset=utf-8")
        .body(Body::from(body))
        .unwrap_or_else(|_| Response::new(Body::from("Internal Server Error")))
}
