//! Domain models for affiliation extraction
//!
//! Records flow one way: articles are flattened into `AuthorRecord`s,
//! the deduplicator keeps one record per identity, and the normalizer
//! rewrites the affiliation of each winner.

pub mod article;
pub mod author_record;
pub mod date_range;
pub mod pub_date;

pub use article::{collect_author_records, Article, ArticleAuthor};
pub use author_record::AuthorRecord;
pub use date_range::{DateRange, DateRangeError};
pub use pub_date::{DatePrecision, ParseDateError, PubDate};
