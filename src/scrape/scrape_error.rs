use thiserror::Error;

/// Failures that abort a single scrape operation.
///
/// A selector that matches nothing is not an error; the query layer turns it
/// into an absent field instead.
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// Missing or invalid configuration. Raised before any network call.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The upstream provider failed or returned something unusable.
    #[error("Provider error: {0}")]
    Provider(String),

    /// The remote browser could not be reached or driven.
    #[error("Browser session error: {0}")]
    Session(String),

    /// The target page failed to load.
    #[error("Navigation error: {0}")]
    Navigation(String),
}

impl ScrapeError {
    pub fn is_config(&self) -> bool {
        matches!(self, ScrapeError::Config(_))
    }
}
