//! Report generation for attribution runs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur during report generation.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A timestamped report wrapping one attribution run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// Report generation timestamp.
    pub generated_at: DateTime<Utc>,

    /// Number of dataset rows the run covered.
    pub dataset_rows: u64,

    /// Report contents (JSON format).
    pub contents: serde_json::Value,
}

impl Report {
    /// Create a new report.
    pub fn new(dataset_rows: u64, contents: serde_json::Value) -> Self {
        Self {
            generated_at: Utc::now(),
            dataset_rows,
            contents,
        }
    }

    /// Convert report to JSON string.
    pub fn to_json(&self) -> Result<String, ReportError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Builder for creating reports.
#[derive(Debug, Default)]
pub struct ReportBuilder {
    dataset_rows: Option<u64>,
    contents: Option<serde_json::Value>,
}

impl ReportBuilder {
    /// Create a new report builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the dataset row count.
    pub const fn dataset_rows(mut self, rows: u64) -> Self {
        self.dataset_rows = Some(rows);
        self
    }

    /// Set the report contents.
    pub fn contents(mut self, contents: serde_json::Value) -> Self {
        self.contents = Some(contents);
        self
    }

    /// Build the report.
    pub fn build(self) -> Report {
        Report::new(
            self.dataset_rows.unwrap_or_default(),
            self.contents.unwrap_or(serde_json::Value::Null),
        )
    }
}
