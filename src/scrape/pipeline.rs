// pipeline.rs
use crate::scrape::enrich::{process_all, EnrichOptions};
use crate::scrape::fetch::DetailFetcher;
use crate::scrape::query::{extract_records, http_link};
use crate::scrape::selectors::SelectorCatalog;
use crate::scrape::session::{BrowserConnector, ScrollPlan, Session};
use crate::scrape::{Listing, ListingQuery, ScrapeError};
use std::time::Instant;
use tracing::{debug, info, warn};
use url::Url;

pub const TRULIA_BASE_URL: &str = "https://www.trulia.com/";

/// Trulia search: browse the city grid in a remote browser, then enrich
/// each card from its detail page.
pub struct ListingSearch<C, F> {
    connector: C,
    fetcher: F,
    catalog: SelectorCatalog,
    base_url: String,
    scroll: ScrollPlan,
    enrich: EnrichOptions,
}

impl<C, F> ListingSearch<C, F>
where
    C: BrowserConnector,
    F: DetailFetcher,
{
    pub fn new(connector: C, fetcher: F, catalog: SelectorCatalog) -> Self {
        Self {
            connector,
            fetcher,
            catalog,
            base_url: TRULIA_BASE_URL.to_string(),
            scroll: ScrollPlan::default(),
            enrich: EnrichOptions::server_rendered(),
        }
    }

    pub fn with_scroll_plan(mut self, scroll: ScrollPlan) -> Self {
        self.scroll = scroll;
        self
    }

    pub fn with_enrich_options(mut self, enrich: EnrichOptions) -> Self {
        self.enrich = enrich;
        self
    }

    #[cfg(test)]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// `<base>/<state>/<city>` with both segments percent-encoded.
    pub fn search_url(&self, query: &ListingQuery) -> Result<Url, ScrapeError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| ScrapeError::Config(format!("invalid listing site url: {e}")))?;
        url.path_segments_mut()
            .map_err(|_| ScrapeError::Config("listing site url cannot take a path".into()))?
            .pop_if_empty()
            .push(query.state.trim())
            .push(query.city.trim());
        Ok(url)
    }

    pub fn run(&self, query: &ListingQuery) -> Result<Vec<Listing>, ScrapeError> {
        let url = self.search_url(query)?;
        let start = Instant::now();
        info!(%url, "starting listing search");

        let html = self.browse_grid(url.as_str())?;

        let mut listings = extract_listings(&html, &self.catalog, Some(&url));
        if listings.is_empty() {
            info!(%url, "no listings found");
            return Ok(listings);
        }
        info!(count = listings.len(), "extracted listings, enriching");

        process_all(&self.fetcher, &mut listings, &self.catalog.mls_source, &self.enrich);

        info!(
            count = listings.len(),
            elapsed = ?start.elapsed(),
            "listing search complete"
        );
        Ok(listings)
    }

    /// Open, navigate, scroll, settle and read the grid page. The session is
    /// released on every path out of here.
    fn browse_grid(&self, url: &str) -> Result<String, ScrapeError> {
        let mut session = Session::open(&self.connector)?;

        session.navigate(url)?;
        let steps = session.reveal(&self.scroll)?;
        debug!(steps, "scrolled grid page");
        session.settle()?;
        let html = session.extract()?;

        if let Err(e) = session.close() {
            warn!("browser session did not close cleanly: {e}");
        }
        Ok(html)
    }
}

/// Turns every listing card on a grid page into a `Listing`, dropping cards
/// without a price. Relative detail links are resolved against `page_url`;
/// links that are not `http(s)` are dropped.
pub fn extract_listings(
    html: &str,
    catalog: &SelectorCatalog,
    page_url: Option<&Url>,
) -> Vec<Listing> {
    extract_records(html, &catalog.listing_card, &catalog.listing_fields)
        .into_iter()
        .map(|mut fields| {
            let mut take = |name: &str| fields.remove(name).flatten();
            Listing {
                price: take("price"),
                beds: take("beds"),
                baths: take("baths"),
                square_footage: take("square_footage"),
                address: take("address"),
                detail_url: take("detail_url").and_then(|href| http_link(&href, page_url)),
                mls_source: None,
            }
        })
        .filter(Listing::has_price)
        .collect()
}
