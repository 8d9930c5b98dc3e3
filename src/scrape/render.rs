// render.rs
use crate::config::{require, Config};
use crate::scrape::fetch::snippet;
use crate::scrape::{RenderResult, ScrapeError};
use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

const RENDER_MUTATION: &str = r#"mutation Scrape($url: String!) {
  goto(url: $url, waitUntil: networkIdle) {
    status
    time
  }
  html {
    html
  }
}"#;

// Response shape. Every level is optional: a partially failed call may
// drop any of them.
//
// {
//   "data": { "goto": { "status", "time" }, "html": { "html" } },
//   "errors": [ { "message" } ]
// }

#[derive(Debug, Deserialize)]
struct RenderPayload {
    data: Option<RenderData>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
struct RenderData {
    goto: Option<GotoResult>,
    html: Option<HtmlResult>,
}

#[derive(Debug, Deserialize)]
struct GotoResult {
    status: Option<u16>,
    time: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct HtmlResult {
    html: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: Option<String>,
}

/// Full-page renders through the browserless BQL endpoint.
pub struct RenderClient {
    client: Client,
    endpoint: String,
    token: Option<String>,
}

impl RenderClient {
    pub fn new(config: &Config) -> Result<Self, ScrapeError> {
        let client = Client::builder()
            .timeout(config.http_timeout)
            .build()
            .map_err(|e| ScrapeError::Provider(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: config.render_endpoint.clone(),
            token: config.render_token.clone(),
        })
    }

    pub fn render(&self, url: &str) -> Result<RenderResult, ScrapeError> {
        let token = require(&self.token, "BROWSERLESS_TOKEN")?;

        let body = json!({
            "query": RENDER_MUTATION,
            "variables": { "url": url },
            "operationName": "Scrape",
        });

        debug!(url, "rendering through browser provider");

        let resp = self
            .client
            .post(&self.endpoint)
            .query(&[("token", token)])
            .json(&body)
            .send()
            .map_err(|e| ScrapeError::Provider(e.without_url().to_string()))?;

        let status = resp.status();
        let text = resp
            .text()
            .map_err(|e| ScrapeError::Provider(e.without_url().to_string()))?;

        if !status.is_success() {
            return Err(ScrapeError::Provider(format!(
                "render provider HTTP {status}: {}",
                snippet(&text)
            )));
        }

        let result = parse_render_payload(&text)?;
        debug!(url, status = ?result.status, elapsed_ms = ?result.elapsed_ms, "render complete");
        Ok(result)
    }
}

/// Turns a provider response body into a `RenderResult`, refusing bodies
/// without a document.
pub fn parse_render_payload(text: &str) -> Result<RenderResult, ScrapeError> {
    let payload: RenderPayload = serde_json::from_str(text)
        .map_err(|e| ScrapeError::Provider(format!("malformed render payload: {e}")))?;

    if !payload.errors.is_empty() {
        let messages: Vec<&str> = payload
            .errors
            .iter()
            .map(|e| e.message.as_deref().unwrap_or("unknown error"))
            .collect();
        return Err(ScrapeError::Provider(format!(
            "render provider reported: {}",
            messages.join("; ")
        )));
    }

    let data = payload
        .data
        .ok_or_else(|| ScrapeError::Provider("render payload has no data".into()))?;

    let html = data
        .html
        .and_then(|h| h.html)
        .ok_or_else(|| ScrapeError::Provider("render payload has no html document".into()))?;

    let (status, elapsed_ms) = data
        .goto
        .map(|g| (g.status, g.time))
        .unwrap_or((None, None));

    Ok(RenderResult {
        html,
        status,
        elapsed_ms,
    })
}
