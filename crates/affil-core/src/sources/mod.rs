//! Bibliographic sources that supply articles with author affiliations

mod error;
pub mod pubmed;

pub use error::SourceError;
#[cfg(feature = "native")]
pub use pubmed::PubMedClient;
pub use pubmed::{build_query, endpoint_url, PubMedSource};
