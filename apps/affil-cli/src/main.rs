//! affil: latest affiliations of an author's coauthors
//!
//! Searches PubMed (or reads a saved efetch response), keeps the newest
//! record per coauthor, normalizes affiliations and prints or saves the
//! resulting table.

mod cli;
mod output;

use std::path::{Path, PathBuf};

use affil_core::config::AffilConfig;
use affil_core::domain::collect_author_records;
use affil_core::sources::{build_query, PubMedClient, PubMedSource};
use affil_core::{
    document_name, select_latest, AffilError, AuthorRecord, DateRange, NormalizedRecord,
    Normalizer,
};
use chrono::NaiveDate;
use clap::Parser;
use serde_json::Value;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Command, NormalizeArgs, OutputArgs, OutputFormat, RecordsArgs, SearchArgs};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(err) = run(cli).await {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "affil=info,affil_core=info",
        1 => "affil=debug,affil_core=debug",
        _ => "affil=trace,affil_core=trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<(), AffilError> {
    let mut config = load_config(cli.config.as_deref())?;
    let today = chrono::Local::now().date_naive();

    match cli.command {
        Command::Search(args) => {
            args.apply(&mut config);
            search(&config, &args, today).await
        }
        Command::Records(args) => {
            args.pipeline.apply(&mut config);
            records(&config, &args)
        }
        Command::Normalize(args) => {
            args.pipeline.apply(&mut config);
            normalize(&config, &args)
        }
        Command::Config => {
            print!("{}", config.to_toml()?);
            Ok(())
        }
    }
}

/// `--config`, then `<config dir>/affil/config.toml`, then defaults
fn load_config(explicit: Option<&Path>) -> Result<AffilConfig, AffilError> {
    if let Some(path) = explicit {
        return Ok(AffilConfig::load(path)?);
    }

    match default_config_path() {
        Some(path) if path.exists() => Ok(AffilConfig::load(&path)?),
        _ => Ok(AffilConfig::default()),
    }
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("affil").join("config.toml"))
}

async fn search(config: &AffilConfig, args: &SearchArgs, today: NaiveDate) -> Result<(), AffilError> {
    config.validate(today)?;
    let range = config.search.date_range(today)?;
    let author = config.search.author.as_str();

    let articles = match &args.xml {
        Some(path) => {
            let xml = std::fs::read_to_string(path)?;
            PubMedSource::parse_efetch_response(&xml)?
        }
        None => {
            let query = build_query(author, &range);
            tracing::info!(%query, "Searching PubMed");
            let client = PubMedClient::new(&config.pubmed)?;
            client.query(&query, config.search.max_results).await?
        }
    };
    tracing::info!(articles = articles.len(), "Retrieved articles");

    let records = collect_author_records(&articles, Some(&range));
    let rows = select_and_normalize(config, &records);

    emit(&rows, &args.output, &document_name(author, &range))
}

fn records(config: &AffilConfig, args: &RecordsArgs) -> Result<(), AffilError> {
    let json = std::fs::read_to_string(&args.input)?;
    let records: Vec<AuthorRecord> = serde_json::from_str(&json)?;
    let rows = select_and_normalize(config, &records);

    let default_name = match rows_range(&rows) {
        Some(range) => document_name(&config.search.author, &range),
        None => "affiliations.csv".to_string(),
    };
    emit(&rows, &args.output, &default_name)
}

fn normalize(config: &AffilConfig, args: &NormalizeArgs) -> Result<(), AffilError> {
    let json = std::fs::read_to_string(&args.input)?;
    let values: Vec<Value> = serde_json::from_str(&json)?;
    let normalized = Normalizer::new(config.normalize).normalize_values(&values)?;
    output::print_affiliations(&normalized)
}

fn select_and_normalize(config: &AffilConfig, records: &[AuthorRecord]) -> Vec<NormalizedRecord> {
    let selected = select_latest(records, config.selection.skip_none_affiliations);
    tracing::info!(
        records = records.len(),
        authors = selected.len(),
        "Selected latest affiliations"
    );
    Normalizer::new(config.normalize).normalize_records(selected)
}

/// Span of affiliation dates in `rows`, used to name saved tables
fn rows_range(rows: &[NormalizedRecord]) -> Option<DateRange> {
    let dates = rows.iter().map(|row| row.record.affiliation_date.sort_key());
    let start = dates.clone().min()?;
    let end = dates.max()?;
    DateRange::new(start, end).ok()
}

fn emit(rows: &[NormalizedRecord], args: &OutputArgs, default_name: &str) -> Result<(), AffilError> {
    match &args.output {
        Some(target) => {
            let path = output::csv_destination(target, default_name);
            output::save_csv(&path, rows)
        }
        None if rows.is_empty() && args.format == OutputFormat::Table => {
            tracing::warn!("No coauthor affiliations found");
            Ok(())
        }
        None => output::print_rows(rows, args.format),
    }
}
