//! Affiliation text normalization
//!
//! Four independent transforms, meant to run in a fixed order:
//! - `clean_affiliation`: newline and whitespace canonicalization
//! - `extract_emails`: pulls email addresses out of the text
//! - `split_camel_case`: separates run-together place names and postcodes
//! - `remove_initials_parenthetical`: drops trailing `(A.B., C.D.)` groups
//!
//! Later stages assume the earlier ones already ran. `Normalizer` chains
//! them with per-stage toggles.

mod affiliation;
mod camel_case;
mod email;
mod initials;
mod patterns;
mod pipeline;

pub use affiliation::{clean_affiliation, clean_affiliation_value, NormalizeError};
pub use camel_case::split_camel_case;
pub use email::extract_emails;
pub use initials::remove_initials_parenthetical;
pub use pipeline::{
    NormalizeOptions, NormalizedAffiliation, NormalizedRecord, Normalizer, PipelineError, Stage,
};
