//! Data Export
//!
//! Serializes the full event store for offline analysis.
//!
//! CSV is the primary format: one header row
//! (`folder,file_name,created_time,modified_time,accessed_time,file_path`)
//! and one row per record in store order. Timestamps are written as
//! ISO-8601 local date-times (`2024-01-02T13:45:00.123456789`), so an
//! export can be read back with [`read_csv`] without loss.
//!
//! JSON (array) and NDJSON are also available for tooling that prefers them.

use serde::{Deserialize, Serialize};
use std::io::{Read, Write};
use std::str::FromStr;
use thiserror::Error;

use crate::storage::{EventStore, FileEvent};

/// Column names of the CSV export, in order
pub const CSV_HEADER: [&str; 6] = [
    "folder",
    "file_name",
    "created_time",
    "modified_time",
    "accessed_time",
    "file_path",
];

/// Errors that can occur during export or re-import
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unsupported export format: {0}. Use csv, json, or ndjson")]
    UnknownFormat(String),
}

/// Result type for export operations
pub type ExportResult<T> = Result<T, ExportError>;

/// Output format for an export
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Csv,
    Json,
    Ndjson,
}

impl ExportFormat {
    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv",
            ExportFormat::Json => "application/json",
            ExportFormat::Ndjson => "application/x-ndjson",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
            ExportFormat::Ndjson => "ndjson",
        }
    }

    /// Suggested download name, e.g. `file_metadata.csv`
    pub fn filename(&self) -> String {
        format!("file_metadata.{}", self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            "ndjson" | "jsonl" => Ok(ExportFormat::Ndjson),
            _ => Err(ExportError::UnknownFormat(s.to_string())),
        }
    }
}

/// Serialize every record of the store, ignoring any active filter
pub fn export(store: &EventStore, format: ExportFormat) -> ExportResult<Vec<u8>> {
    let mut buf = Vec::new();
    match format {
        ExportFormat::Csv => write_csv(store.events(), &mut buf)?,
        ExportFormat::Json => serde_json::to_writer_pretty(&mut buf, store.events())?,
        ExportFormat::Ndjson => write_ndjson(store.events(), &mut buf)?,
    }

    tracing::info!(
        format = format.extension(),
        records = store.len(),
        bytes = buf.len(),
        "Exported event store"
    );

    Ok(buf)
}

/// Write records as CSV with a header row
pub fn write_csv<W: Write>(events: &[FileEvent], writer: W) -> ExportResult<()> {
    // Header written explicitly so an empty store still produces one
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    wtr.write_record(CSV_HEADER)?;
    for event in events {
        wtr.serialize(event)?;
    }
    wtr.flush()?;
    Ok(())
}

fn write_ndjson<W: Write>(events: &[FileEvent], mut writer: W) -> ExportResult<()> {
    for event in events {
        serde_json::to_writer(&mut writer, event)?;
        writer.write_all(b"\n")?;
    }
    Ok(())
}

/// Read records back from a CSV export
pub fn read_csv<R: Read>(reader: R) -> ExportResult<Vec<FileEvent>> {
    let mut rdr = csv::Reader::from_reader(reader);
    let mut events = Vec::new();
    for record in rdr.deserialize() {
        events.push(record?);
    }
    Ok(events)
}
