//! Deduplication of coauthor records
//!
//! Groups records by author identity and keeps the most recent record
//! for each person, optionally preferring records that carry an
//! affiliation.

mod latest;

pub use latest::{select_latest, select_latest_with_policy, SelectionPolicy};
