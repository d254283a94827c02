//! Command-line arguments

use std::path::PathBuf;

use affil_core::config::AffilConfig;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "affil", version, about = "Latest affiliations of an author's coauthors")]
pub struct Cli {
    /// Config file (TOML or JSON); defaults to <config dir>/affil/config.toml
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Search PubMed and list each coauthor's latest affiliation
    Search(SearchArgs),
    /// Select and normalize a JSON array of author records
    Records(RecordsArgs),
    /// Normalize a JSON array of raw affiliation values
    Normalize(NormalizeArgs),
    /// Print the effective configuration as TOML
    Config,
}

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Author term, e.g. "Yates, John 3rd"
    #[arg(long)]
    pub author: Option<String>,

    /// First creation date (YYYY-MM-DD), inclusive
    #[arg(long)]
    pub start: Option<NaiveDate>,

    /// Last creation date (YYYY-MM-DD), inclusive
    #[arg(long)]
    pub end: Option<NaiveDate>,

    #[arg(long)]
    pub max_results: Option<u32>,

    /// Read a saved efetch XML response instead of querying PubMed
    #[arg(long)]
    pub xml: Option<PathBuf>,

    #[command(flatten)]
    pub pipeline: PipelineArgs,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Args, Debug)]
pub struct RecordsArgs {
    /// JSON file holding an array of author records
    pub input: PathBuf,

    #[command(flatten)]
    pub pipeline: PipelineArgs,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Args, Debug)]
pub struct NormalizeArgs {
    /// JSON file holding an array of affiliation strings or nulls
    pub input: PathBuf,

    #[command(flatten)]
    pub pipeline: PipelineArgs,
}

/// Selection and normalization toggles shared by the subcommands
#[derive(Args, Debug, Default)]
pub struct PipelineArgs {
    /// Keep the newest record even when its affiliation is missing
    #[arg(long)]
    pub keep_missing: bool,

    #[arg(long)]
    pub no_clean: bool,

    #[arg(long)]
    pub no_emails: bool,

    #[arg(long)]
    pub no_camel_case: bool,

    #[arg(long)]
    pub no_initials: bool,
}

impl PipelineArgs {
    /// Apply flags on top of file configuration; flags only ever disable
    pub fn apply(&self, config: &mut AffilConfig) {
        if self.keep_missing {
            config.selection.skip_none_affiliations = false;
        }
        if self.no_clean {
            config.normalize.clean = false;
        }
        if self.no_emails {
            config.normalize.extract_emails = false;
        }
        if self.no_camel_case {
            config.normalize.split_camel_case = false;
        }
        if self.no_initials {
            config.normalize.remove_initials = false;
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Csv,
    Json,
}

#[derive(Args, Debug, Default)]
pub struct OutputArgs {
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Write CSV to this file, or into this directory under the default name
    #[arg(long)]
    pub output: Option<PathBuf>,
}

impl SearchArgs {
    pub fn apply(&self, config: &mut AffilConfig) {
        if let Some(author) = &self.author {
            config.search.author = author.clone();
        }
        if let Some(start) = self.start {
            config.search.start_date = Some(start);
        }
        if let Some(end) = self.end {
            config.search.end_date = Some(end);
        }
        if let Some(max) = self.max_results {
            config.search.max_results = max;
        }
        self.pipeline.apply(config);
    }
}
