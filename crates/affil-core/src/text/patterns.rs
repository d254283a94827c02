//! Regexes shared by several normalization stages

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref WHITESPACE_RUN: Regex = Regex::new(r"\s+").unwrap();

    // ". ." left behind when something between two sentence ends is removed
    static ref BROKEN_SENTENCE: Regex = Regex::new(r"\.\s+\.").unwrap();
}

/// Collapse every whitespace run to a single space.
pub(crate) fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_RUN.replace_all(text, " ").into_owned()
}

/// Merge `". ."` (any whitespace between the dots) into `"."`.
pub(crate) fn join_broken_sentences(text: &str) -> String {
    BROKEN_SENTENCE.replace_all(text, ".").into_owned()
}
