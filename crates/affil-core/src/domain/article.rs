//! Articles as returned by a bibliographic source, and their flattening
//! into per-author records

use serde::{Deserialize, Serialize};

use super::{AuthorRecord, DateRange, PubDate};

/// An author entry on a single article
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleAuthor {
    pub last_name: Option<String>,
    pub fore_name: Option<String>,
    pub initials: Option<String>,
    /// One entry per affiliation element, in document order
    pub affiliations: Vec<String>,
}

impl ArticleAuthor {
    /// All affiliations joined by newlines, `None` when there are none.
    ///
    /// Newlines become `"; "` once the affiliation is cleaned.
    pub fn affiliation(&self) -> Option<String> {
        if self.affiliations.is_empty() {
            None
        } else {
            Some(self.affiliations.join("\n"))
        }
    }
}

/// A fetched article
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub pmid: String,
    pub title: Option<String>,
    pub publication_date: PubDate,
    pub authors: Vec<ArticleAuthor>,
}

impl Article {
    /// One record per author that has at least one name.
    pub fn author_records(&self) -> Vec<AuthorRecord> {
        self.authors
            .iter()
            .map(|author| AuthorRecord {
                last_name: author.last_name.clone(),
                first_name: author.fore_name.clone(),
                initials: author.initials.clone(),
                affiliation: author.affiliation(),
                affiliation_date: self.publication_date,
                source_title: self.title.clone(),
            })
            .filter(|record| record.identity().is_some())
            .collect()
    }
}

/// Flatten articles into author records, keeping only articles whose
/// publication date falls inside `range` when one is given.
pub fn collect_author_records(articles: &[Article], range: Option<&DateRange>) -> Vec<AuthorRecord> {
    let mut records = Vec::new();
    let mut outside = 0usize;

    for article in articles {
        if let Some(range) = range {
            if !range.contains(&article.publication_date) {
                outside += 1;
                continue;
            }
        }
        records.extend(article.author_records());
    }

    if outside > 0 {
        tracing::debug!(
            skipped = outside,
            "Skipped articles published outside the date range"
        );
    }
    tracing::debug!(
        articles = articles.len(),
        records = records.len(),
        "Flattened articles into author records"
    );

    records
}
