// enrich.rs
use crate::scrape::fetch::{DetailFetcher, FetchOptions};
use crate::scrape::pool::run_bounded;
use crate::scrape::query::extract_text;
use crate::scrape::{Listing, ScrapeError};
use scraper::Selector;
use tracing::{info, warn};

pub const DEFAULT_CONCURRENCY: usize = 5;

/// How detail pages are fetched during enrichment.
#[derive(Debug, Clone)]
pub struct EnrichOptions {
    pub fetch: FetchOptions,
    pub max_concurrency: usize,
}

impl EnrichOptions {
    /// Detail pages are server-rendered, so no JavaScript is needed.
    pub fn server_rendered() -> Self {
        Self {
            fetch: FetchOptions::premium_us(false),
            max_concurrency: DEFAULT_CONCURRENCY,
        }
    }

    /// Runs the detail page's JavaScript before reading it.
    pub fn rendered() -> Self {
        Self {
            fetch: FetchOptions::premium_us(true),
            max_concurrency: DEFAULT_CONCURRENCY,
        }
    }

    /// Lowers the fetch cap. Values above `DEFAULT_CONCURRENCY` are clamped
    /// to it, and 0 becomes 1.
    pub fn with_concurrency(mut self, max_concurrency: usize) -> Self {
        self.max_concurrency = max_concurrency.clamp(1, DEFAULT_CONCURRENCY);
        self
    }
}

/// Fetches one listing's detail page and reads its MLS attribution.
pub fn scrape_mls_source<F: DetailFetcher + ?Sized>(
    fetcher: &F,
    listing: &Listing,
    mls_selector: &Selector,
    options: &FetchOptions,
) -> Result<String, ScrapeError> {
    let url = listing
        .detail_url
        .as_deref()
        .ok_or_else(|| ScrapeError::Provider("listing has no detail url".into()))?;

    let html = fetcher.fetch(url, options)?;
    Ok(extract_text(&html, mls_selector))
}

/// Attaches an MLS source to every listing, with a bounded number of detail
/// fetches in flight. Failures are logged and leave that listing's
/// `mls_source` empty; they never abort the batch. Returns how many
/// listings were enriched.
pub fn process_all<F: DetailFetcher + ?Sized>(
    fetcher: &F,
    listings: &mut [Listing],
    mls_selector: &Selector,
    options: &EnrichOptions,
) -> usize {
    let outcomes = run_bounded(listings, options.max_concurrency, |listing| {
        scrape_mls_source(fetcher, listing, mls_selector, &options.fetch)
    });

    let mut enriched = 0;
    for (listing, outcome) in listings.iter_mut().zip(outcomes) {
        match outcome {
            Ok(source) => {
                listing.mls_source = Some(source);
                enriched += 1;
            }
            Err(e) => {
                warn!(
                    url = listing.detail_url.as_deref().unwrap_or("<none>"),
                    "failed to scrape MLS source: {e}"
                );
            }
        }
    }

    info!(enriched, total = listings.len(), "all listings processed");
    enriched
}
