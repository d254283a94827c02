//! affil-core: latest coauthor affiliations from bibliographic records
//!
//! This library provides pure Rust implementations of:
//! - Latest-affiliation selection per coauthor identity
//! - Affiliation text normalization (cleanup, email extraction,
//!   camel-case splitting, initials parenthetical removal)
//! - PubMed query construction and E-utilities XML parsing
//! - CSV export of the final affiliation table
//!
//! Fetching from PubMed is available behind the `native` feature.

pub mod config;
pub mod deduplication;
pub mod domain;
pub mod error;
pub mod export;
#[cfg(feature = "native")]
pub mod http;
pub mod sources;
pub mod text;

// Re-export main types for convenience
pub use config::{AffilConfig, ConfigError};
pub use deduplication::{select_latest, SelectionPolicy};
pub use domain::{Article, ArticleAuthor, AuthorRecord, DateRange, DateRangeError, PubDate};
pub use error::{AffilError, Result};
pub use export::{document_name, ExportError};
pub use text::{
    clean_affiliation, clean_affiliation_value, extract_emails, remove_initials_parenthetical,
    split_camel_case, NormalizeError, NormalizeOptions, NormalizedAffiliation, NormalizedRecord,
    Normalizer, PipelineError, Stage,
};

/// Returns the version of affil-core
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
