use crate::app::App;
use crate::errors::ServerError;
use crate::responses::{html_response, text_response, ResultResp};
use crate::scrape::web_search::search_web;
use crate::scrape::{ListingQuery, WebQuery};
use crate::templates::pages;
use astra::Request;
use std::collections::HashMap;
use std::io::Read;
use tracing::info;

const MAX_FORM_BYTES: u64 = 16 * 1024;

pub fn handle(mut req: Request, app: &App) -> ResultResp {
    let method = req.method().as_str().to_string();
    let path = req.uri().path().to_string();
    info!(%method, %path, "request");

    match (method.as_str(), path.as_str()) {
        ("GET", "/") => html_response(pages::home_page()),
        ("GET", "/health") => text_response(200, "ok"),

        ("POST", "/search-trulia") => {
            let form = parse_form(&mut req)?;
            let query = ListingQuery {
                state: required(&form, "state")?,
                city: required(&form, "city")?,
            };

            let listings = app.listings.run(&query)?;
            html_response(pages::listings_page(&query, &listings))
        }

        ("POST", "/search-google") => {
            let form = parse_form(&mut req)?;
            let query = WebQuery {
                question: required(&form, "question")?,
            };

            let hits = search_web(&app.render, &app.catalog, &query.question)?;
            html_response(pages::search_results_page(&query, &hits))
        }

        _ => Err(ServerError::NotFound),
    }
}

/// Reads an `application/x-www-form-urlencoded` body.
fn parse_form(req: &mut Request) -> Result<HashMap<String, String>, ServerError> {
    let mut body = Vec::new();
    req.body_mut()
        .reader()
        .take(MAX_FORM_BYTES)
        .read_to_end(&mut body)
        .map_err(|e| ServerError::BadRequest(format!("unreadable form body: {e}")))?;

    Ok(url::form_urlencoded::parse(&body).into_owned().collect())
}

fn required(form: &HashMap<String, String>, key: &str) -> Result<String, ServerError> {
    form.get(key)
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .ok_or_else(|| ServerError::BadRequest(format!("missing field `{key}`")))
}
