//! Per-publication coauthor record

use serde::{Deserialize, Serialize};

use super::PubDate;

/// One coauthor entry on one publication
///
/// Records are built once from source data and never mutated; the
/// deduplicator and normalizer produce new records.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorRecord {
    pub last_name: Option<String>,
    pub first_name: Option<String>,
    pub initials: Option<String>,
    pub affiliation: Option<String>,
    pub affiliation_date: PubDate,
    pub source_title: Option<String>,
}

impl AuthorRecord {
    /// Create a record with only a date; names and affiliation start empty
    pub fn new(affiliation_date: PubDate) -> Self {
        Self {
            last_name: None,
            first_name: None,
            initials: None,
            affiliation: None,
            affiliation_date,
            source_title: None,
        }
    }

    /// Builder method to add last name
    pub fn with_last_name(mut self, last_name: impl Into<String>) -> Self {
        self.last_name = Some(last_name.into());
        self
    }

    /// Builder method to add first name
    pub fn with_first_name(mut self, first_name: impl Into<String>) -> Self {
        self.first_name = Some(first_name.into());
        self
    }

    pub fn with_initials(mut self, initials: impl Into<String>) -> Self {
        self.initials = Some(initials.into());
        self
    }

    pub fn with_affiliation(mut self, affiliation: impl Into<String>) -> Self {
        self.affiliation = Some(affiliation.into());
        self
    }

    pub fn with_source_title(mut self, title: impl Into<String>) -> Self {
        self.source_title = Some(title.into());
        self
    }

    /// The key that decides whether two records are the same person.
    ///
    /// `"Last, First"` when both names are present, otherwise whichever
    /// one is present, `None` when both are missing. Matching is exact
    /// and case-sensitive.
    pub fn identity(&self) -> Option<String> {
        match (&self.last_name, &self.first_name) {
            (Some(last), Some(first)) => Some(format!("{}, {}", last, first)),
            (Some(last), None) => Some(last.clone()),
            (None, Some(first)) => Some(first.clone()),
            (None, None) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> PubDate {
        PubDate::from_ymd(2021, 1, 1).unwrap()
    }

    #[test]
    fn test_identity_full_name() {
        let record = AuthorRecord::new(date())
            .with_last_name("Yates")
            .with_first_name("John R");
        assert_eq!(record.identity(), Some("Yates, John R".to_string()));
    }

    #[test]
    fn test_identity_falls_back_to_single_name() {
        let last_only = AuthorRecord::new(date()).with_last_name("Yates");
        assert_eq!(last_only.identity(), Some("Yates".to_string()));

        let first_only = AuthorRecord::new(date()).with_first_name("John R");
        assert_eq!(first_only.identity(), Some("John R".to_string()));
    }

    #[test]
    fn test_identity_missing() {
        assert_eq!(AuthorRecord::new(date()).identity(), None);
    }

    #[test]
    fn test_identity_is_case_sensitive() {
        let a = AuthorRecord::new(date()).with_last_name("Yates");
        let b = AuthorRecord::new(date()).with_last_name("yates");
        assert_ne!(a.identity(), b.identity());
    }
}
