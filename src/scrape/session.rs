// session.rs
use crate::config::{require, Config};
use crate::scrape::ScrapeError;
use headless_chrome::types::Bounds;
use headless_chrome::{Browser, Tab};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

pub const USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/132.0.0.0 Safari/537.36";
pub const VIEWPORT_WIDTH: f64 = 1280.0;
pub const VIEWPORT_HEIGHT: f64 = 800.0;

/// Resolves once resource loading has been quiet for 500ms, or with `false`
/// after 15s.
const NETWORK_IDLE_SCRIPT: &str = r#"
    new Promise((resolve) => {
        const quietMs = 500;
        const deadline = Date.now() + 15000;
        let last = performance.getEntriesByType('resource').length;
        let stableSince = Date.now();
        const timer = setInterval(() => {
            const now = Date.now();
            const count = performance.getEntriesByType('resource').length;
            if (count !== last) {
                last = count;
                stableSince = now;
            }
            if (now - stableSince >= quietMs || now >= deadline) {
                clearInterval(timer);
                resolve(now < deadline);
            }
        }, 100);
    })
"#;

const NAVIGATION_STATUS_SCRIPT: &str = r#"
    (() => {
        const nav = performance.getEntriesByType('navigation')[0];
        return nav && nav.responseStatus ? nav.responseStatus : null;
    })()
"#;

/// One page inside a remote browser.
pub trait BrowserPage {
    fn navigate(&mut self, url: &str) -> Result<(), ScrapeError>;
    /// `Ok(false)` when the network never went quiet before the deadline.
    fn wait_for_network_idle(&mut self) -> Result<bool, ScrapeError>;
    fn scroll_height(&mut self) -> Result<f64, ScrapeError>;
    fn scroll_by(&mut self, distance: f64) -> Result<(), ScrapeError>;
    fn content(&mut self) -> Result<String, ScrapeError>;
    fn close(&mut self) -> Result<(), ScrapeError>;
}

/// Opens pages on some remote browser.
pub trait BrowserConnector {
    type Page: BrowserPage;

    fn connect(&self) -> Result<Self::Page, ScrapeError>;
}

/// Scroll-to-load heuristic. Not guaranteed to reveal every lazy card.
#[derive(Debug, Clone)]
pub struct ScrollPlan {
    pub max_steps: usize,
    pub distance: f64,
    pub interval: Duration,
}

impl Default for ScrollPlan {
    fn default() -> Self {
        Self {
            max_steps: 5,
            distance: 300.0,
            interval: Duration::from_millis(200),
        }
    }
}

/// An open page that is closed exactly once: by `close`, or on drop when
/// an earlier step bailed out.
pub struct Session<P: BrowserPage> {
    page: Option<P>,
}

impl<P: BrowserPage> Session<P> {
    pub fn open<C>(connector: &C) -> Result<Self, ScrapeError>
    where
        C: BrowserConnector<Page = P>,
    {
        let page = connector.connect()?;
        debug!("browser session opened");
        Ok(Self { page: Some(page) })
    }

    fn page(&mut self) -> Result<&mut P, ScrapeError> {
        self.page
            .as_mut()
            .ok_or_else(|| ScrapeError::Session("session already closed".into()))
    }

    /// Loads `url` and waits for the network to go idle.
    pub fn navigate(&mut self, url: &str) -> Result<(), ScrapeError> {
        let page = self.page()?;
        page.navigate(url)?;
        if !page.wait_for_network_idle()? {
            return Err(ScrapeError::Navigation(format!(
                "timed out waiting for {url} to go idle"
            )));
        }
        Ok(())
    }

    /// Scrolls in fixed steps, stopping early once the scrolled distance
    /// reaches the page height read at that step. Returns the steps taken.
    pub fn reveal(&mut self, plan: &ScrollPlan) -> Result<usize, ScrapeError> {
        let page = self.page()?;
        let mut scrolled = 0.0;

        for step in 1..=plan.max_steps {
            std::thread::sleep(plan.interval);
            let height = page.scroll_height()?;
            page.scroll_by(plan.distance)?;
            scrolled += plan.distance;

            if scrolled >= height {
                debug!(step, scrolled, height, "reached end of page");
                return Ok(step);
            }
        }

        Ok(plan.max_steps)
    }

    /// Waits for requests triggered by scrolling. A page that never goes
    /// quiet is extracted anyway.
    pub fn settle(&mut self) -> Result<(), ScrapeError> {
        if !self.page()?.wait_for_network_idle()? {
            warn!("network still busy after scrolling, extracting anyway");
        }
        Ok(())
    }

    /// Current document HTML.
    pub fn extract(&mut self) -> Result<String, ScrapeError> {
        self.page()?.content()
    }

    pub fn close(mut self) -> Result<(), ScrapeError> {
        match self.page.take() {
            Some(mut page) => page.close(),
            None => Ok(()),
        }
    }
}

impl<P: BrowserPage> Drop for Session<P> {
    fn drop(&mut self) {
        if let Some(mut page) = self.page.take() {
            if let Err(e) = page.close() {
                warn!("failed to close browser session: {e}");
            }
        }
    }
}

/// ZenRows scraping browser, spoken to over CDP.
pub struct RemoteBrowser {
    endpoint: String,
    api_key: Option<String>,
}

impl RemoteBrowser {
    pub fn new(config: &Config) -> Self {
        Self {
            endpoint: config.browser_endpoint.clone(),
            api_key: config.fetch_api_key.clone(),
        }
    }

    /// Websocket URL of a US-located browser.
    pub fn connect_url(&self) -> Result<Url, ScrapeError> {
        let api_key = require(&self.api_key, "ZENROWS_API_KEY")?;
        Url::parse_with_params(
            &self.endpoint,
            &[("apikey", api_key), ("proxy_country", "us")],
        )
        .map_err(|e| ScrapeError::Config(format!("invalid browser endpoint: {e}")))
    }

    fn redact(&self, message: String) -> String {
        match self.api_key.as_deref() {
            Some(key) => message.replace(key, "***"),
            None => message,
        }
    }
}

impl BrowserConnector for RemoteBrowser {
    type Page = RemotePage;

    fn connect(&self) -> Result<RemotePage, ScrapeError> {
        let ws_url = self.connect_url()?;

        let browser = Browser::connect(ws_url.to_string()).map_err(|e| {
            ScrapeError::Session(self.redact(format!("cannot reach remote browser: {e}")))
        })?;
        let tab = browser
            .new_tab()
            .map_err(|e| ScrapeError::Session(format!("cannot open page: {e}")))?;

        let mut page = RemotePage {
            tab,
            _browser: browser,
        };
        if let Err(e) = page.configure() {
            if let Err(close_err) = page.close() {
                warn!("failed to close unconfigured page: {close_err}");
            }
            return Err(e);
        }
        Ok(page)
    }
}

pub struct RemotePage {
    tab: Arc<Tab>,
    // dropping the browser closes the websocket
    _browser: Browser,
}

impl RemotePage {
    fn configure(&mut self) -> Result<(), ScrapeError> {
        self.tab
            .set_bounds(Bounds::Normal {
                left: Some(0),
                top: Some(0),
                width: Some(VIEWPORT_WIDTH),
                height: Some(VIEWPORT_HEIGHT),
            })
            .map_err(|e| ScrapeError::Session(format!("cannot set viewport: {e}")))?;
        self.tab
            .set_user_agent(USER_AGENT, None, None)
            .map_err(|e| ScrapeError::Session(format!("cannot set user agent: {e}")))?;
        Ok(())
    }

    fn eval(&self, script: &str, await_promise: bool) -> Result<Option<serde_json::Value>, ScrapeError> {
        self.tab
            .evaluate(script, await_promise)
            .map(|obj| obj.value)
            .map_err(|e| ScrapeError::Session(format!("page script failed: {e}")))
    }
}

impl BrowserPage for RemotePage {
    fn navigate(&mut self, url: &str) -> Result<(), ScrapeError> {
        self.tab
            .navigate_to(url)
            .and_then(|tab| tab.wait_until_navigated())
            .map_err(|e| ScrapeError::Navigation(format!("{url}: {e}")))?;

        let status = self
            .eval(NAVIGATION_STATUS_SCRIPT, false)?
            .and_then(|v| v.as_u64());
        match status {
            Some(code) if !(200..300).contains(&code) => Err(ScrapeError::Navigation(format!(
                "{url} answered HTTP {code}"
            ))),
            _ => Ok(()),
        }
    }

    fn wait_for_network_idle(&mut self) -> Result<bool, ScrapeError> {
        let idle = self
            .eval(NETWORK_IDLE_SCRIPT, true)?
            .and_then(|v| v.as_bool())
            .unwrap_or(false);
        Ok(idle)
    }

    fn scroll_height(&mut self) -> Result<f64, ScrapeError> {
        self.eval("document.body.scrollHeight", false)?
            .and_then(|v| v.as_f64())
            .ok_or_else(|| ScrapeError::Session("page has no scroll height".into()))
    }

    fn scroll_by(&mut self, distance: f64) -> Result<(), ScrapeError> {
        self.eval(&format!("window.scrollBy(0, {distance})"), false)?;
        Ok(())
    }

    fn content(&mut self) -> Result<String, ScrapeError> {
        self.tab
            .get_content()
            .map_err(|e| ScrapeError::Session(format!("cannot read page content: {e}")))
    }

    fn close(&mut self) -> Result<(), ScrapeError> {
        self.tab
            .close(true)
            .map(|_| ())
            .map_err(|e| ScrapeError::Session(format!("cannot close page: {e}")))
    }
}
