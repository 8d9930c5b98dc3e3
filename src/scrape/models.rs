/// One listing card from the search grid, plus the MLS source attached by
/// enrichment. Every extracted field is optional since markup drifts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Listing {
    pub price: Option<String>,
    pub beds: Option<String>,
    pub baths: Option<String>,
    pub square_footage: Option<String>,
    pub address: Option<String>,
    pub detail_url: Option<String>,

    // None until enrichment succeeds
    pub mls_source: Option<String>,
}

impl Listing {
    pub fn has_price(&self) -> bool {
        self.price.as_deref().is_some_and(|p| !p.trim().is_empty())
    }
}

/// Form body of `POST /search-trulia`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingQuery {
    pub state: String,
    pub city: String,
}

/// Form body of `POST /search-google`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebQuery {
    pub question: String,
}

/// What the render provider hands back for one URL.
#[derive(Debug, Clone)]
pub struct RenderResult {
    pub html: String,
    pub status: Option<u16>,
    pub elapsed_ms: Option<f64>,
}

/// One organic search-engine result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    pub title: String,
    pub url: Option<String>,
}
