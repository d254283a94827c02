//! Removal of staff-initials parentheticals such as `(S.T., R.L., J.C.)`

use lazy_static::lazy_static;
use regex::Regex;

use super::patterns::{collapse_whitespace, join_broken_sentences};

lazy_static! {
    // Only groups made entirely of "X." tokens; "(TSRI)" does not match
    static ref INITIALS_GROUP: Regex = Regex::new(r"\(([A-Z]\.,?\s?)+\)").unwrap();

    static ref SPACE_BEFORE_PERIOD: Regex = Regex::new(r"\s+\.").unwrap();
}

/// Remove parenthesized lists of initials from an affiliation.
///
/// Parentheses holding anything else are left alone.
pub fn remove_initials_parenthetical(text: Option<&str>) -> Option<String> {
    let text = text?;

    let cleaned = INITIALS_GROUP.replace_all(text, "");
    let cleaned = join_broken_sentences(&cleaned);
    let cleaned = collapse_whitespace(&cleaned);
    let cleaned = SPACE_BEFORE_PERIOD.replace_all(&cleaned, ".");

    Some(cleaned.trim().to_string())
}
