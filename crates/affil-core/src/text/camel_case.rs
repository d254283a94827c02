//! Splitting of run-together words and postcodes
//!
//! PubMed affiliations often lose the space between a city and a state
//! or between a state and its postcode (`SeattleWashington98109`).
//! Each rewrite is a single left-to-right pass and is not repeated.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // CA92037 -> CA 92037
    static ref LETTER_ZIP: Regex = Regex::new(r"([a-zA-Z])(\d{5})").unwrap();

    // SanDiego -> San Diego
    static ref LOWER_UPPER_LOWER: Regex = Regex::new(r"([a-z])([a-z])([A-Z])([a-z])").unwrap();

    // SacramentoSD -> Sacramento SD
    static ref LOWER_UPPER_UPPER: Regex = Regex::new(r"([a-z])([a-z])([A-Z])([A-Z])").unwrap();

    // 28Stockholm -> 28 Stockholm
    static ref DIGIT_WORD: Regex = Regex::new(r"([0-9])([A-Z])([a-z])").unwrap();
}

/// Insert spaces at lower/upper-case and letter/digit boundaries.
pub fn split_camel_case(text: Option<&str>) -> Option<String> {
    let text = text?;

    let text = LETTER_ZIP.replace_all(text, "${1} ${2}");
    let text = LOWER_UPPER_LOWER.replace_all(&text, "${1}${2} ${3}${4}");
    let text = LOWER_UPPER_UPPER.replace_all(&text, "${1}${2} ${3}${4}");
    let text = DIGIT_WORD.replace_all(&text, "${1} ${2}${3}");

    Some(text.into_owned())
}
