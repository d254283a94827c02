//! Export of the final affiliation table

use std::io;

use thiserror::Error;

use crate::domain::DateRange;
use crate::text::NormalizedRecord;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Output is not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
}

/// Column order of exported tables
pub const CSV_HEADER: [&str; 8] = [
    "name",
    "last_name",
    "first_name",
    "initials",
    "affiliation",
    "emails",
    "affiliation_date",
    "source_title",
];

/// One table row, in `CSV_HEADER` order. Missing values are empty strings.
pub fn table_row(row: &NormalizedRecord) -> [String; 8] {
    let record = &row.record;
    let text = |value: &Option<String>| value.clone().unwrap_or_default();

    [
        record.identity().unwrap_or_default(),
        text(&record.last_name),
        text(&record.first_name),
        text(&record.initials),
        text(&record.affiliation),
        text(&row.emails),
        record.affiliation_date.to_string(),
        text(&record.source_title),
    ]
}

/// Write the table as CSV with a header row
pub fn write_csv<W: io::Write>(writer: W, rows: &[NormalizedRecord]) -> Result<(), ExportError> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(CSV_HEADER)?;
    for row in rows {
        wtr.write_record(table_row(row))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Render the table as a CSV string
pub fn to_csv_string(rows: &[NormalizedRecord]) -> Result<String, ExportError> {
    let mut buffer = Vec::new();
    write_csv(&mut buffer, rows)?;
    Ok(String::from_utf8(buffer)?)
}

/// Suggested file name for a download:
/// `Yates,John3rd_affiliations_2019_06_01_2024_05_31.csv`
pub fn document_name(author: &str, range: &DateRange) -> String {
    format!(
        "{}_affiliations_{}_{}.csv",
        author.replace(' ', ""),
        range.start().format("%Y_%m_%d"),
        range.end().format("%Y_%m_%d")
    )
}
