//! CSV ingestion for touchpoint datasets.
//!
//! Column names are configurable through [`DatasetSchema`] so the loader can
//! consume exports from different tracking systems; defaults match the
//! canonical `cookie,time,interaction,conversion,conversion_value,channel`
//! attribution dump. Validation is fatal: a malformed file never produces a
//! partial [`Dataset`].

use crate::error::{DataError, Result};
use crate::event::{Dataset, TouchEvent};
use std::io::Read;
use std::path::Path;
use tracing::info;

/// Column mapping for a touchpoint CSV file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetSchema {
    /// Column holding the user (cookie) identifier.
    pub user_col: String,
    /// Column holding the channel name.
    pub channel_col: String,
    /// Column holding the binary conversion flag.
    pub conversion_col: String,
    /// Column holding the conversion value.
    pub value_col: String,
}

impl Default for DatasetSchema {
    fn default() -> Self {
        Self {
            user_col: "cookie".to_string(),
            channel_col: "channel".to_string(),
            conversion_col: "conversion".to_string(),
            value_col: "conversion_value".to_string(),
        }
    }
}

/// Load a touchpoint dataset from a CSV file.
///
/// Row order in the file is preserved; the positional heuristics depend on it.
pub fn load_csv<P: AsRef<Path>>(path: P, schema: &DatasetSchema) -> Result<Dataset> {
    let file = std::fs::File::open(path.as_ref())?;
    let dataset = read_events(file, schema)?;
    info!(
        rows = dataset.len(),
        users = dataset.unique_users(),
        channels = dataset.channels().len(),
        "dataset loaded"
    );
    Ok(dataset)
}

/// Read touchpoint events from any CSV source.
pub fn read_events<R: Read>(reader: R, schema: &DatasetSchema) -> Result<Dataset> {
    let mut rdr = csv::ReaderBuilder::new().has_headers(true).from_reader(reader);

    let header = rdr.headers()?.clone();
    let user_idx = column_index(&header, &schema.user_col)?;
    let channel_idx = column_index(&header, &schema.channel_col)?;
    let conversion_idx = column_index(&header, &schema.conversion_col)?;
    let value_idx = column_index(&header, &schema.value_col)?;

    let mut events = Vec::new();
    for (i, record) in rdr.records().enumerate() {
        let record = record?;
        let row = i + 1;

        let conversion = parse_flag(record.get(conversion_idx).unwrap_or(""), row, &schema.conversion_col)?;
        let conversion_value = parse_value(record.get(value_idx).unwrap_or(""), row, &schema.value_col)?;

        events.push(TouchEvent {
            user_id: record.get(user_idx).unwrap_or("").to_string(),
            channel: record.get(channel_idx).unwrap_or("").to_string(),
            conversion,
            conversion_value,
        });
    }

    Ok(Dataset::new(events))
}

fn column_index(header: &csv::StringRecord, column: &str) -> Result<usize> {
    header
        .iter()
        .position(|h| h == column)
        .ok_or_else(|| DataError::MissingColumn {
            column: column.to_string(),
            header: header.iter().collect::<Vec<_>>().join(","),
        })
}

fn parse_flag(raw: &str, row: usize, column: &str) -> Result<bool> {
    match raw.trim() {
        "1" => Ok(true),
        "0" | "" => Ok(false),
        other => match other.to_ascii_lowercase().as_str() {
            "true" => Ok(true),
            "false" => Ok(false),
            _ => Err(DataError::InvalidValue {
                row,
                column: column.to_string(),
                value: raw.to_string(),
            }),
        },
    }
}

fn parse_value(raw: &str, row: usize, column: &str) -> Result<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(0.0);
    }
    trimmed.parse::<f64>().map_err(|_| DataError::InvalidValue {
        row,
        column: column.to_string(),
        value: raw.to_string(),
    })
}
