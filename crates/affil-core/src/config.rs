//! Configuration for affiliation runs
//!
//! Search window, selection policy, normalization toggles, and PubMed
//! client settings. Loadable from TOML or JSON; every field has a default.
//!
//! ```toml
//! [search]
//! author = "Yates, John 3rd"
//! start_date = "2020-01-01"
//! max_results = 5000
//!
//! [selection]
//! skip_none_affiliations = true
//!
//! [normalize]
//! split_camel_case = false
//!
//! [pubmed]
//! email = "someone@example.org"
//! ```

use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{DateRange, DateRangeError};
use crate::text::NormalizeOptions;

/// Run-wide configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AffilConfig {
    pub search: SearchConfig,
    pub selection: SelectionConfig,
    pub normalize: NormalizeOptions,
    pub pubmed: PubMedConfig,
}

/// What to search for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Author term as PubMed expects it, e.g. `"Yates, John 3rd"`
    pub author: String,
    /// First creation date to include; defaults to five years before today
    pub start_date: Option<NaiveDate>,
    /// Last creation date to include; defaults to today
    pub end_date: Option<NaiveDate>,
    /// Upper bound on PMIDs requested from esearch
    pub max_results: u32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            author: "Yates, John 3rd".to_string(),
            start_date: None,
            end_date: None,
            max_results: 5_000,
        }
    }
}

impl SearchConfig {
    /// Resolve the search window, filling unset ends from `today`.
    pub fn date_range(&self, today: NaiveDate) -> Result<DateRange, DateRangeError> {
        let default = DateRange::default_window(today);
        DateRange::new(
            self.start_date.unwrap_or(default.start()),
            self.end_date.unwrap_or(default.end()),
        )
    }
}

/// How one record per author is chosen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionConfig {
    /// Prefer the newest record that has an affiliation
    pub skip_none_affiliations: bool,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            skip_none_affiliations: true,
        }
    }
}

/// NCBI E-utilities settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PubMedConfig {
    pub base_url: String,
    /// Tool name reported to NCBI
    pub tool: String,
    /// Contact address reported to NCBI
    pub email: Option<String>,
    pub api_key: Option<String>,
    pub timeout_secs: u64,
}

impl Default for PubMedConfig {
    fn default() -> Self {
        Self {
            base_url: "https://eutils.ncbi.nlm.nih.gov/entrez/eutils".to_string(),
            tool: "Author Affiliation Tool".to_string(),
            email: None,
            api_key: None,
            timeout_secs: 30,
        }
    }
}

/// Configuration loading or validation error
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read {path}: {message}")]
    Io { path: String, message: String },

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Value out of range: {0}")]
    OutOfRange(String),

    #[error("Missing field: {0}")]
    MissingField(String),

    #[error(transparent)]
    DateRange(#[from] DateRangeError),
}

impl AffilConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Serialize configuration to TOML
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json_str: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json_str)?)
    }

    /// Serialize configuration to JSON
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load from a file; `.json` files are read as JSON, anything else as TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let config = if is_json {
            Self::from_json(&contents)?
        } else {
            Self::from_toml(&contents)?
        };

        tracing::debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Validate configuration values against `today`
    pub fn validate(&self, today: NaiveDate) -> Result<(), ConfigError> {
        if self.search.author.trim().is_empty() {
            return Err(ConfigError::MissingField("search.author".to_string()));
        }

        if self.search.max_results == 0 {
            return Err(ConfigError::OutOfRange(
                "search.max_results must be positive".to_string(),
            ));
        }

        if self.pubmed.timeout_secs == 0 {
            return Err(ConfigError::OutOfRange(
                "pubmed.timeout_secs must be positive".to_string(),
            ));
        }

        self.search.date_range(today)?;

        Ok(())
    }
}
