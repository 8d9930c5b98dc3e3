// src/tests/utils.rs
use crate::app::App;
use crate::config::Config;
use crate::scrape::fetch::{DetailFetcher, FetchOptions};
use crate::scrape::selectors::SelectorCatalog;
use crate::scrape::session::{BrowserConnector, BrowserPage, ScrollPlan};
use crate::scrape::ScrapeError;
use astra::{Body, Request, Response};
use http::Method;
use std::collections::HashMap;
use std::io::Read;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const MLS_NAME: &str = "Austin Board of Realtors";

/// Three cards, the middle one without a price.
pub const GRID_HTML: &str = r#"
<html><body>
<ul>
  <li data-testid="srp-home-card-0">
    <div data-testid="property-price">$500,000</div>
    <div data-testid="property-beds">3bd</div>
    <div data-testid="property-baths">2ba</div>
    <div data-testid="property-floorSpace">1,500 sqft</div>
    <div data-testid="property-address">1 Main St, Austin, TX 78701</div>
    <a data-testid="property-card-link" href="/home/1-main-st-austin-tx-78701">View</a>
  </li>
  <li data-testid="srp-home-card-1">
    <div data-testid="property-beds">2bd</div>
    <div data-testid="property-address">9 Nowhere Rd, Austin, TX 78702</div>
    <a data-testid="property-card-link" href="/home/9-nowhere-rd">View</a>
  </li>
  <li data-testid="srp-home-card-2">
    <div data-testid="property-price">$750,000</div>
    <div data-testid="property-beds">4bd</div>
    <div data-testid="property-baths">3ba</div>
    <div data-testid="property-address">2 Oak Ave, Austin, TX 78703</div>
    <a data-testid="property-card-link" href="https://www.trulia.com/home/2-oak-ave-austin-tx-78703">View</a>
  </li>
</ul>
</body></html>
"#;

pub const FIRST_DETAIL_URL: &str = "https://www.trulia.com/home/1-main-st-austin-tx-78701";
pub const SECOND_DETAIL_URL: &str = "https://www.trulia.com/home/2-oak-ave-austin-tx-78703";

pub fn detail_html(mls: &str) -> String {
    format!(
        r#"<html><body><div class="attribution">
        <span data-testid="hdp-attribution-block-mls-source">{mls}</span>
        </div></body></html>"#
    )
}

pub fn catalog() -> SelectorCatalog {
    SelectorCatalog::embedded().expect("embedded selector catalog must parse")
}

pub fn fast_scroll() -> ScrollPlan {
    ScrollPlan {
        interval: Duration::ZERO,
        ..ScrollPlan::default()
    }
}

/// Counters shared between a fake connector and the test body.
#[derive(Clone, Default)]
pub struct BrowserLog {
    pub opens: Arc<AtomicUsize>,
    pub closes: Arc<AtomicUsize>,
    pub scrolls: Arc<AtomicUsize>,
    pub navigations: Arc<Mutex<Vec<String>>>,
}

impl BrowserLog {
    pub fn opens(&self) -> usize {
        self.opens.load(Ordering::SeqCst)
    }

    pub fn closes(&self) -> usize {
        self.closes.load(Ordering::SeqCst)
    }

    pub fn scrolls(&self) -> usize {
        self.scrolls.load(Ordering::SeqCst)
    }
}

pub struct FakeBrowser {
    pub html: String,
    pub heights: Vec<f64>,
    pub fail_connect: bool,
    pub fail_navigation: bool,
    pub log: BrowserLog,
}

impl FakeBrowser {
    pub fn serving(html: &str) -> Self {
        Self {
            html: html.to_string(),
            heights: vec![10_000.0],
            fail_connect: false,
            fail_navigation: false,
            log: BrowserLog::default(),
        }
    }
}

impl BrowserConnector for FakeBrowser {
    type Page = FakePage;

    fn connect(&self) -> Result<FakePage, ScrapeError> {
        if self.fail_connect {
            return Err(ScrapeError::Session("remote browser unreachable".into()));
        }
        self.log.opens.fetch_add(1, Ordering::SeqCst);
        Ok(FakePage {
            html: self.html.clone(),
            heights: self.heights.clone(),
            height_reads: 0,
            fail_navigation: self.fail_navigation,
            log: self.log.clone(),
        })
    }
}

pub struct FakePage {
    html: String,
    heights: Vec<f64>,
    height_reads: usize,
    fail_navigation: bool,
    log: BrowserLog,
}

impl BrowserPage for FakePage {
    fn navigate(&mut self, url: &str) -> Result<(), ScrapeError> {
        self.log
            .navigations
            .lock()
            .expect("navigation log poisoned")
            .push(url.to_string());
        if self.fail_navigation {
            return Err(ScrapeError::Navigation(format!("{url} answered HTTP 503")));
        }
        Ok(())
    }

    fn wait_for_network_idle(&mut self) -> Result<bool, ScrapeError> {
        Ok(true)
    }

    // Walks the scripted heights, repeating the last one.
    fn scroll_height(&mut self) -> Result<f64, ScrapeError> {
        let idx = self.height_reads.min(self.heights.len().saturating_sub(1));
        self.height_reads += 1;
        Ok(self.heights.get(idx).copied().unwrap_or(0.0))
    }

    fn scroll_by(&mut self, _distance: f64) -> Result<(), ScrapeError> {
        self.log.scrolls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn content(&mut self) -> Result<String, ScrapeError> {
        Ok(self.html.clone())
    }

    fn close(&mut self) -> Result<(), ScrapeError> {
        self.log.closes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Serves canned detail pages; any other url is a provider failure.
#[derive(Default)]
pub struct FakeFetcher {
    pub pages: HashMap<String, String>,
    pub delay: Duration,
    pub calls: AtomicUsize,
    in_flight: AtomicUsize,
    peak: AtomicUsize,
    pub seen_options: Mutex<Vec<FetchOptions>>,
}

impl FakeFetcher {
    pub fn with_page(mut self, url: &str, html: String) -> Self {
        self.pages.insert(url.to_string(), html);
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl DetailFetcher for FakeFetcher {
    fn fetch(&self, url: &str, options: &FetchOptions) -> Result<String, ScrapeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen_options
            .lock()
            .expect("options log poisoned")
            .push(options.clone());

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        std::thread::sleep(self.delay);
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| ScrapeError::Provider(format!("fetch provider HTTP 422 for {url}")))
    }
}

/// App wired with default config: no credentials, nothing reachable.
pub fn offline_app() -> App {
    App::new(&Config::default()).expect("default config must build an app")
}

pub fn request(method: Method, uri: &str, body: &str) -> Request {
    let mut req = Request::new(Body::from(body.to_string()));
    *req.method_mut() = method;
    *req.uri_mut() = uri.parse().expect("test uri must parse");
    req.headers_mut().insert(
        "Content-Type",
        "application/x-www-form-urlencoded"
            .parse()
            .expect("static header value"),
    );
    req
}

pub fn body_string(resp: &mut Response) -> String {
    let mut bytes = Vec::new();
    resp.body_mut()
        .reader()
        .read_to_end(&mut bytes)
        .expect("response body must be readable");
    String::from_utf8(bytes).expect("response body must be utf-8")
}
