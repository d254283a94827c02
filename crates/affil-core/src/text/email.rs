//! Email address extraction from affiliation text

use lazy_static::lazy_static;
use regex::Regex;

use super::patterns::{collapse_whitespace, join_broken_sentences};

lazy_static! {
    static ref EMAIL_REGEX: Regex =
        Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}").unwrap();
}

/// Boilerplate PubMed puts in front of corresponding-author addresses
const ELECTRONIC_ADDRESS: &str = "Electronic address:";

/// Remove email addresses from an affiliation.
///
/// Returns the cleaned text and every address found, joined with `";"`
/// (`None` when there were none). The `"Electronic address:"` label is
/// stripped too, along with the `". ."` it tends to leave behind.
pub fn extract_emails(text: Option<&str>) -> (Option<String>, Option<String>) {
    let Some(text) = text else {
        return (None, None);
    };

    let emails: Vec<&str> = EMAIL_REGEX.find_iter(text).map(|m| m.as_str()).collect();

    let cleaned = EMAIL_REGEX.replace_all(text, "");
    let cleaned = cleaned.replace(ELECTRONIC_ADDRESS, "");
    let cleaned = join_broken_sentences(&cleaned);
    let cleaned = collapse_whitespace(&cleaned).trim().to_string();

    let joined = if emails.is_empty() {
        None
    } else {
        Some(emails.join(";"))
    };

    (Some(cleaned), joined)
}
