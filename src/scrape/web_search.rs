// web_search.rs
use crate::scrape::query::{extract_records, http_link};
use crate::scrape::render::RenderClient;
use crate::scrape::selectors::SelectorCatalog;
use crate::scrape::{ScrapeError, SearchHit};
use tracing::info;
use url::Url;

pub const GOOGLE_SEARCH_URL: &str = "https://www.google.com/search";

pub fn search_url(question: &str) -> Result<Url, ScrapeError> {
    Url::parse_with_params(GOOGLE_SEARCH_URL, &[("q", question.trim())])
        .map_err(|e| ScrapeError::Config(format!("invalid search url: {e}")))
}

/// Organic results only; ad blocks use different markup. Result links are
/// resolved against the search page and kept only when `http(s)`.
pub fn extract_search_hits(html: &str, catalog: &SelectorCatalog) -> Vec<SearchHit> {
    let base = Url::parse(GOOGLE_SEARCH_URL).ok();
    extract_records(html, &catalog.search_result, &catalog.search_fields)
        .into_iter()
        .map(|mut fields| SearchHit {
            title: fields.remove("title").flatten().unwrap_or_default(),
            url: fields
                .remove("url")
                .flatten()
                .and_then(|href| http_link(&href, base.as_ref())),
        })
        .collect()
}

/// Renders the search page remotely and pulls out its organic results.
pub fn search_web(
    client: &RenderClient,
    catalog: &SelectorCatalog,
    question: &str,
) -> Result<Vec<SearchHit>, ScrapeError> {
    let url = search_url(question)?;
    let rendered = client.render(url.as_str())?;
    let hits = extract_search_hits(&rendered.html, catalog);
    info!(count = hits.len(), status = ?rendered.status, "search results extracted");
    Ok(hits)
}
