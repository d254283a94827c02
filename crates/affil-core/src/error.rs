//! Error types for affil-core

use thiserror::Error;

use crate::config::ConfigError;
use crate::domain::{DateRangeError, ParseDateError};
use crate::export::ExportError;
use crate::sources::SourceError;
use crate::text::{NormalizeError, PipelineError};

/// Result type alias for affil-core operations
pub type Result<T> = std::result::Result<T, AffilError>;

/// Main error type for affiliation runs
#[derive(Error, Debug)]
pub enum AffilError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    DateRange(#[from] DateRangeError),

    #[error(transparent)]
    Date(#[from] ParseDateError),

    #[error("Source error: {0}")]
    Source(#[from] SourceError),

    #[error(transparent)]
    Normalize(#[from] NormalizeError),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
