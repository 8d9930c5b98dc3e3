// errors.rs
use crate::scrape::ScrapeError;
use thiserror::Error;

/// Errors a request handler can end with. Each maps to one error page.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Not Found")]
    NotFound,

    #[error("Bad Request: {0}")]
    BadRequest(String),

    /// A provider, the remote browser or the target site failed.
    #[error("Upstream Error: {0}")]
    Upstream(String),

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("Internal Server Error")]
    InternalError,
}

impl ServerError {
    pub fn status(&self) -> u16 {
        match self {
            ServerError::NotFound => 404,
            ServerError::BadRequest(_) => 400,
            ServerError::Upstream(_) => 502,
            ServerError::Config(_) | ServerError::InternalError => 500,
        }
    }
}

impl From<ScrapeError> for ServerError {
    fn from(err: ScrapeError) -> Self {
        match err {
            ScrapeError::Config(msg) => ServerError::Config(msg),
            other => ServerError::Upstream(other.to_string()),
        }
    }
}
