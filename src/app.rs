// app.rs
use crate::config::Config;
use crate::scrape::enrich::EnrichOptions;
use crate::scrape::fetch::FetchClient;
use crate::scrape::pipeline::ListingSearch;
use crate::scrape::render::RenderClient;
use crate::scrape::selectors::SelectorCatalog;
use crate::scrape::session::RemoteBrowser;
use crate::scrape::ScrapeError;

/// Long-lived handles shared by every request worker.
pub struct App {
    pub listings: ListingSearch<RemoteBrowser, FetchClient>,
    pub render: RenderClient,
    pub catalog: SelectorCatalog,
}

impl App {
    /// Builds the clients. Missing credentials are not an error here; they
    /// fail the first call that needs them.
    pub fn new(config: &Config) -> Result<Self, ScrapeError> {
        let catalog = SelectorCatalog::load(config.selectors_path.as_deref())?;

        let listings = ListingSearch::new(
            RemoteBrowser::new(config),
            FetchClient::new(config)?,
            catalog.clone(),
        )
        .with_enrich_options(
            EnrichOptions::server_rendered().with_concurrency(config.enrich_concurrency),
        );

        Ok(Self {
            listings,
            render: RenderClient::new(config)?,
            catalog,
        })
    }
}
