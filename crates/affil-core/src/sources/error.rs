//! Errors raised while querying or parsing a bibliographic source

use thiserror::Error;

#[cfg(feature = "native")]
use crate::http::HttpError;

#[derive(Error, Debug)]
pub enum SourceError {
    #[cfg(feature = "native")]
    #[error("HTTP error: {0}")]
    Http(HttpError),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Rate limited by source")]
    RateLimit,
    /// The source rejected the search term
    #[error("Invalid query: {0}")]
    InvalidQuery(String),
    #[error("Invalid endpoint {url}: {message}")]
    InvalidEndpoint { url: String, message: String },
}

#[cfg(feature = "native")]
impl From<HttpError> for SourceError {
    fn from(e: HttpError) -> Self {
        match e {
            HttpError::RateLimited => SourceError::RateLimit,
            other => SourceError::Http(other),
        }
    }
}
