//! Toggleable normalization pipeline
//!
//! Stages always run in the order `clean -> extract emails -> split camel
//! case -> remove initials`. A disabled stage is skipped without changing
//! what the other stages receive or return.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use super::affiliation::{clean_affiliation, expect_text, NormalizeError};
use super::{extract_emails, remove_initials_parenthetical, split_camel_case};
use crate::domain::AuthorRecord;

/// One normalization stage
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Stage {
    Clean,
    ExtractEmails,
    SplitCamelCase,
    RemoveInitials,
}

impl Stage {
    /// Pipeline order
    pub const ORDER: [Stage; 4] = [
        Stage::Clean,
        Stage::ExtractEmails,
        Stage::SplitCamelCase,
        Stage::RemoveInitials,
    ];

    /// Name of the `NormalizeOptions` field (and config key) that toggles this stage
    pub fn toggle_name(&self) -> &'static str {
        match self {
            Stage::Clean => "clean",
            Stage::ExtractEmails => "extract_emails",
            Stage::SplitCamelCase => "split_camel_case",
            Stage::RemoveInitials => "remove_initials",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Stage::Clean => "Clean affiliations",
            Stage::ExtractEmails => "Extract emails",
            Stage::SplitCamelCase => "Split camel case",
            Stage::RemoveInitials => "Remove initials",
        };
        f.write_str(label)
    }
}

/// A stage failed; processing for the run should stop.
///
/// `stage` is `None` when the value was rejected with every stage disabled.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{}", describe_failure(.stage, .source))]
pub struct PipelineError {
    pub stage: Option<Stage>,
    pub source: NormalizeError,
}

fn describe_failure(stage: &Option<Stage>, source: &NormalizeError) -> String {
    match stage {
        Some(stage) => format!(
            "{stage} failed: {source}. Disable `{}` to skip this step.",
            stage.toggle_name()
        ),
        None => format!("Affiliation rejected with no normalization stage enabled: {source}"),
    }
}

/// Which stages run
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizeOptions {
    pub clean: bool,
    pub extract_emails: bool,
    pub split_camel_case: bool,
    pub remove_initials: bool,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            clean: true,
            extract_emails: true,
            split_camel_case: true,
            remove_initials: true,
        }
    }
}

impl NormalizeOptions {
    /// Every stage disabled
    pub fn none() -> Self {
        Self {
            clean: false,
            extract_emails: false,
            split_camel_case: false,
            remove_initials: false,
        }
    }

    pub fn is_enabled(&self, stage: Stage) -> bool {
        match stage {
            Stage::Clean => self.clean,
            Stage::ExtractEmails => self.extract_emails,
            Stage::SplitCamelCase => self.split_camel_case,
            Stage::RemoveInitials => self.remove_initials,
        }
    }

    pub fn enabled_stages(&self) -> Vec<Stage> {
        Stage::ORDER
            .into_iter()
            .filter(|stage| self.is_enabled(*stage))
            .collect()
    }
}

/// Output of the pipeline for one affiliation field
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedAffiliation {
    pub affiliation: Option<String>,
    /// Addresses removed by the email stage, joined with `";"`
    pub emails: Option<String>,
}

/// A selected record with its affiliation normalized
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedRecord {
    #[serde(flatten)]
    pub record: AuthorRecord,
    pub emails: Option<String>,
}

/// Runs the enabled stages over affiliation fields
#[derive(Clone, Debug, Default)]
pub struct Normalizer {
    options: NormalizeOptions,
}

impl Normalizer {
    pub fn new(options: NormalizeOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &NormalizeOptions {
        &self.options
    }

    /// Normalize a typed affiliation. Total: there is nothing to reject.
    pub fn normalize(&self, text: Option<&str>) -> NormalizedAffiliation {
        let mut current = text.map(str::to_string);
        let mut emails = None;

        for stage in self.options.enabled_stages() {
            current = match stage {
                Stage::Clean => clean_affiliation(current.as_deref()),
                Stage::ExtractEmails => {
                    let (cleaned, found) = extract_emails(current.as_deref());
                    emails = found;
                    cleaned
                }
                Stage::SplitCamelCase => split_camel_case(current.as_deref()),
                Stage::RemoveInitials => remove_initials_parenthetical(current.as_deref()),
            };
        }

        NormalizedAffiliation {
            affiliation: current,
            emails,
        }
    }

    /// Normalize a field of unknown type.
    ///
    /// A non-string, non-null value fails at the first enabled stage, or
    /// with no stage named when every stage is disabled.
    pub fn normalize_value(&self, value: &Value) -> Result<NormalizedAffiliation, PipelineError> {
        let text = expect_text(value).map_err(|source| PipelineError {
            stage: self.first_stage(),
            source,
        })?;
        Ok(self.normalize(text))
    }

    /// Normalize a column of loosely-typed fields, stopping at the first failure.
    pub fn normalize_values(
        &self,
        values: &[Value],
    ) -> Result<Vec<NormalizedAffiliation>, PipelineError> {
        values.iter().map(|value| self.normalize_value(value)).collect()
    }

    /// Rewrite the affiliation of every record.
    pub fn normalize_records(&self, records: Vec<AuthorRecord>) -> Vec<NormalizedRecord> {
        let normalized: Vec<NormalizedRecord> = records
            .into_iter()
            .map(|record| {
                let result = self.normalize(record.affiliation.as_deref());
                NormalizedRecord {
                    record: AuthorRecord {
                        affiliation: result.affiliation,
                        ..record
                    },
                    emails: result.emails,
                }
            })
            .collect();

        tracing::debug!(
            records = normalized.len(),
            stages = ?self.options.enabled_stages(),
            "Normalized affiliations"
        );

        normalized
    }

    fn first_stage(&self) -> Option<Stage> {
        self.options.enabled_stages().first().copied()
    }
}
