// config.rs
use crate::scrape::ScrapeError;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_RENDER_ENDPOINT: &str = "https://production-sfo.browserless.io/chromium/bql";
pub const DEFAULT_FETCH_ENDPOINT: &str = "https://api.zenrows.com/v1/";
pub const DEFAULT_BROWSER_ENDPOINT: &str = "wss://browser.zenrows.com";

/// Everything the app reads from the environment, loaded once in `main`
/// and handed to the clients that need it.
#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: String,
    pub port: u16,
    pub max_workers: usize,

    pub render_token: Option<String>,
    pub render_endpoint: String,

    pub fetch_api_key: Option<String>,
    pub fetch_endpoint: String,
    pub browser_endpoint: String,

    pub enrich_concurrency: usize,
    pub http_timeout: Duration,
    pub selectors_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1".to_string(),
            port: 3000,
            max_workers: 8,
            render_token: None,
            render_endpoint: DEFAULT_RENDER_ENDPOINT.to_string(),
            fetch_api_key: None,
            fetch_endpoint: DEFAULT_FETCH_ENDPOINT.to_string(),
            browser_endpoint: DEFAULT_BROWSER_ENDPOINT.to_string(),
            enrich_concurrency: 5,
            http_timeout: Duration::from_secs(120),
            selectors_path: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ScrapeError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any key lookup. Unset keys keep their defaults,
    /// blank credentials count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ScrapeError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        Ok(Self {
            bind_addr: get("BIND_ADDR").unwrap_or(defaults.bind_addr),
            port: parse_or(get("PORT"), "PORT", defaults.port)?,
            max_workers: parse_or(get("MAX_WORKERS"), "MAX_WORKERS", defaults.max_workers)?,
            render_token: get("BROWSERLESS_TOKEN"),
            render_endpoint: get("BROWSERLESS_ENDPOINT").unwrap_or(defaults.render_endpoint),
            fetch_api_key: get("ZENROWS_API_KEY"),
            fetch_endpoint: get("ZENROWS_ENDPOINT").unwrap_or(defaults.fetch_endpoint),
            browser_endpoint: get("ZENROWS_BROWSER_ENDPOINT")
                .unwrap_or(defaults.browser_endpoint),
            enrich_concurrency: parse_or(
                get("ENRICH_CONCURRENCY"),
                "ENRICH_CONCURRENCY",
                defaults.enrich_concurrency,
            )?,
            http_timeout: Duration::from_secs(parse_or(
                get("HTTP_TIMEOUT_SECS"),
                "HTTP_TIMEOUT_SECS",
                defaults.http_timeout.as_secs(),
            )?),
            selectors_path: get("SELECTORS_PATH").map(PathBuf::from),
        })
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, ScrapeError> {
        format!("{}:{}", self.bind_addr, self.port)
            .parse()
            .map_err(|e| ScrapeError::Config(format!("invalid listen address: {e}")))
    }
}

fn parse_or<T: std::str::FromStr>(
    raw: Option<String>,
    key: &str,
    default: T,
) -> Result<T, ScrapeError> {
    match raw {
        None => Ok(default),
        Some(v) => v
            .parse()
            .map_err(|_| ScrapeError::Config(format!("{key} must be a number, got {v:?}"))),
    }
}

/// Fails fast when a credential is absent.
pub fn require<'a>(value: &'a Option<String>, name: &str) -> Result<&'a str, ScrapeError> {
    value
        .as_deref()
        .ok_or_else(|| ScrapeError::Config(format!("{name} is not set")))
}
