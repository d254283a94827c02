//! Rendering of the affiliation table

use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use affil_core::export::{table_row, write_csv, CSV_HEADER};
use affil_core::{AffilError, NormalizedAffiliation, NormalizedRecord};
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};

use crate::cli::OutputFormat;

/// Build a terminal table with the export column order
pub fn render_table(rows: &[NormalizedRecord]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(CSV_HEADER);
    for row in rows {
        table.add_row(table_row(row));
    }
    table
}

/// Write `rows` to stdout in the requested format
pub fn print_rows(rows: &[NormalizedRecord], format: OutputFormat) -> Result<(), AffilError> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match format {
        OutputFormat::Table => writeln!(out, "{}", render_table(rows))?,
        OutputFormat::Csv => write_csv(&mut out, rows)?,
        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(rows)?)?,
    }
    Ok(())
}

/// Write normalized affiliations to stdout, one JSON array
pub fn print_affiliations(values: &[NormalizedAffiliation]) -> Result<(), AffilError> {
    println!("{}", serde_json::to_string_pretty(values)?);
    Ok(())
}

/// Resolve the CSV destination; a directory receives `default_name`.
pub fn csv_destination(target: &Path, default_name: &str) -> PathBuf {
    if target.is_dir() {
        target.join(default_name)
    } else {
        target.to_path_buf()
    }
}

/// Save `rows` as CSV at `path`
pub fn save_csv(path: &Path, rows: &[NormalizedRecord]) -> Result<(), AffilError> {
    let file = File::create(path)?;
    write_csv(file, rows)?;
    tracing::info!(path = %path.display(), rows = rows.len(), "Saved affiliation table");
    Ok(())
}
