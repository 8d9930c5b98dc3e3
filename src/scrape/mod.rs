mod models;
mod scrape_error;

pub mod enrich;
pub mod fetch;
pub mod pipeline;
pub mod pool;
pub mod query;
pub mod render;
pub mod selectors;
pub mod session;
pub mod web_search;

pub use models::{Listing, ListingQuery, RenderResult, SearchHit, WebQuery};
pub use scrape_error::ScrapeError;
