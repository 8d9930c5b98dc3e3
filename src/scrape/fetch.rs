// fetch.rs
use crate::config::{require, Config};
use crate::scrape::ScrapeError;
use reqwest::blocking::Client;
use std::time::Instant;
use tracing::debug;

/// Per-call knobs of the proxy fetch provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOptions {
    pub javascript_render: bool,
    pub premium_proxy: bool,
    pub proxy_country: Option<String>,
}

impl FetchOptions {
    /// Premium residential proxy located in the US.
    pub fn premium_us(javascript_render: bool) -> Self {
        Self {
            javascript_render,
            premium_proxy: true,
            proxy_country: Some("us".to_string()),
        }
    }
}

/// Anything that can fetch a page's HTML. The enrichment stage only needs
/// this, which keeps it testable without the network.
pub trait DetailFetcher: Sync {
    fn fetch(&self, url: &str, options: &FetchOptions) -> Result<String, ScrapeError>;
}

impl<T: DetailFetcher + ?Sized> DetailFetcher for &T {
    fn fetch(&self, url: &str, options: &FetchOptions) -> Result<String, ScrapeError> {
        (**self).fetch(url, options)
    }
}

/// Proxied single-shot fetches through the ZenRows HTTP API.
pub struct FetchClient {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
}

impl FetchClient {
    pub fn new(config: &Config) -> Result<Self, ScrapeError> {
        let client = Client::builder()
            .timeout(config.http_timeout)
            .build()
            .map_err(|e| ScrapeError::Provider(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: config.fetch_endpoint.clone(),
            api_key: config.fetch_api_key.clone(),
        })
    }

    fn query_params(&self, url: &str, api_key: &str, options: &FetchOptions) -> Vec<(&'static str, String)> {
        let mut params = vec![("url", url.to_string()), ("apikey", api_key.to_string())];
        if options.javascript_render {
            params.push(("js_render", "true".to_string()));
        }
        if options.premium_proxy {
            params.push(("premium_proxy", "true".to_string()));
        }
        if let Some(country) = options.proxy_country.as_deref().filter(|c| !c.is_empty()) {
            params.push(("proxy_country", country.to_string()));
        }
        params
    }
}

impl DetailFetcher for FetchClient {
    fn fetch(&self, url: &str, options: &FetchOptions) -> Result<String, ScrapeError> {
        let api_key = require(&self.api_key, "ZENROWS_API_KEY")?;
        let params = self.query_params(url, api_key, options);

        debug!(
            url,
            js_render = options.javascript_render,
            premium_proxy = options.premium_proxy,
            "fetching through proxy provider"
        );
        let start = Instant::now();

        // without_url keeps the api key out of error text
        let resp = self
            .client
            .get(&self.endpoint)
            .query(&params)
            .send()
            .map_err(|e| ScrapeError::Provider(e.without_url().to_string()))?;

        let status = resp.status();
        let text = resp
            .text()
            .map_err(|e| ScrapeError::Provider(e.without_url().to_string()))?;

        if !status.is_success() {
            return Err(ScrapeError::Provider(format!(
                "fetch provider HTTP {status}: {}",
                snippet(&text)
            )));
        }

        check_fetch_body(&text)?;

        debug!(url, elapsed = ?start.elapsed(), bytes = text.len(), "fetch complete");
        Ok(text)
    }
}

/// The provider sometimes reports failures as a 2xx JSON body with a `code`.
pub fn check_fetch_body(text: &str) -> Result<(), ScrapeError> {
    if text.trim_start().starts_with('{') {
        if let Ok(json) = serde_json::from_str::<serde_json::Value>(text) {
            if json.get("code").is_some() {
                return Err(ScrapeError::Provider(format!(
                    "fetch provider API error: {}",
                    snippet(text)
                )));
            }
        }
    }
    Ok(())
}

/// First couple hundred chars of a provider body, for error messages.
pub(crate) fn snippet(text: &str) -> String {
    const MAX_CHARS: usize = 200;
    let mut out: String = text.chars().take(MAX_CHARS).collect();
    if text.chars().count() > MAX_CHARS {
        out.push('…');
    }
    out
}
