//! Export functionality for combined attribution results.
//!
//! Writes the combined per-model weight matrix to CSV or JSON files for
//! spreadsheets and downstream pipelines.

use crate::combine::CombinedAttribution;
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// Errors that can occur during export operations.
#[derive(Debug, Error)]
pub enum ExportError {
    /// CSV serialization error.
    #[error("CSV serialization error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Export format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Comma-separated values format.
    Csv,

    /// Compact JSON format.
    Json,

    /// Pretty-printed JSON format.
    PrettyJson,
}

impl ExportFormat {
    /// Get the file extension for this format.
    pub const fn extension(&self) -> &str {
        match self {
            Self::Csv => "csv",
            Self::Json | Self::PrettyJson => "json",
        }
    }

    /// Pick a format from a path's extension (CSV for `.csv`, pretty JSON
    /// otherwise).
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        match path.as_ref().extension().and_then(|e| e.to_str()) {
            Some("csv") => Self::Csv,
            _ => Self::PrettyJson,
        }
    }
}

/// One CSV row of the combined table.
#[derive(Debug, Serialize)]
struct CombinedRow<'a> {
    channel: &'a str,
    last_touch: f64,
    first_touch: f64,
    last_non_direct: f64,
    linear: f64,
    u_shaped: f64,
    position_decay: f64,
    markov: f64,
    mean: f64,
}

/// Exporter for attribution results.
#[derive(Debug, Clone, Copy)]
pub struct Exporter {
    format: ExportFormat,
}

impl Exporter {
    /// Create an exporter for the given format.
    pub const fn new(format: ExportFormat) -> Self {
        Self { format }
    }

    /// Write the combined attribution table to `path`.
    ///
    /// A path without an extension gets the format's default extension
    /// appended.
    pub fn export_combined<P: AsRef<Path>>(
        &self,
        combined: &CombinedAttribution,
        path: P,
    ) -> Result<(), ExportError> {
        let path = self.resolve_path(path.as_ref());
        match self.format {
            ExportFormat::Csv => self.write_csv(combined, &path)?,
            ExportFormat::Json => {
                let mut file = File::create(&path)?;
                file.write_all(serde_json::to_string(combined)?.as_bytes())?;
            }
            ExportFormat::PrettyJson => {
                let mut file = File::create(&path)?;
                file.write_all(serde_json::to_string_pretty(combined)?.as_bytes())?;
            }
        }
        info!(path = %path.display(), format = ?self.format, "results exported");
        Ok(())
    }

    fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.extension().is_some() {
            path.to_path_buf()
        } else {
            path.with_extension(self.format.extension())
        }
    }

    fn write_csv(&self, combined: &CombinedAttribution, path: &Path) -> Result<(), ExportError> {
        let mut writer = csv::Writer::from_path(path)?;
        for (channel, b) in &combined.channels {
            writer.serialize(CombinedRow {
                channel,
                last_touch: b.last_touch,
                first_touch: b.first_touch,
                last_non_direct: b.last_non_direct,
                linear: b.linear,
                u_shaped: b.u_shaped,
                position_decay: b.position_decay,
                markov: b.markov,
                mean: b.mean,
            })?;
        }
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combine::ModelBreakdown;
    use std::collections::BTreeMap;

    fn combined() -> CombinedAttribution {
        let mut channels = BTreeMap::new();
        channels.insert(
            "Email".to_string(),
            ModelBreakdown {
                last_touch: 50.0,
                first_touch: 50.0,
                last_non_direct: 50.0,
                linear: 50.0,
                u_shaped: 50.0,
                position_decay: 50.0,
                markov: 50.0,
                mean: 50.0,
            },
        );
        CombinedAttribution { channels }
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(ExportFormat::from_path("out.csv"), ExportFormat::Csv);
        assert_eq!(ExportFormat::from_path("out.json"), ExportFormat::PrettyJson);
        assert_eq!(ExportFormat::from_path("out"), ExportFormat::PrettyJson);
    }

    #[test]
    fn test_csv_export_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("combined.csv");

        Exporter::new(ExportFormat::Csv)
            .export_combined(&combined(), &path)
            .unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("channel,last_touch"));
        assert!(contents.contains("Email,50.0"));
    }

    #[test]
    fn test_extensionless_path_gets_format_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("combined");

        Exporter::new(ExportFormat::Csv)
            .export_combined(&combined(), &path)
            .unwrap();

        assert!(!path.exists());
        assert!(path.with_extension("csv").exists());
    }

    #[test]
    fn test_json_export() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("combined.json");

        Exporter::new(ExportFormat::PrettyJson)
            .export_combined(&combined(), &path)
            .unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&contents).unwrap();
        assert_eq!(value["Email"]["Mean"], 50.0);
    }
}
