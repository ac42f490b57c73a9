//! Error types for dataset operations.

use thiserror::Error;

/// Result type for dataset operations.
pub type Result<T> = std::result::Result<T, DataError>;

/// Errors that can occur while loading or validating a touchpoint dataset.
///
/// All of these are fatal at load time: a dataset that fails to load is
/// never handed to the engine.
#[derive(Debug, Error)]
pub enum DataError {
    /// CSV parsing error
    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A required column is missing from the dataset header
    #[error("missing required column '{column}' (header has: {header})")]
    MissingColumn {
        /// Name of the missing column
        column: String,
        /// The header actually present, comma-joined
        header: String,
    },

    /// A cell could not be parsed into the expected type
    #[error("invalid value '{value}' for column '{column}' at row {row}")]
    InvalidValue {
        /// 1-based data row number (excluding the header)
        row: usize,
        /// Column the value belongs to
        column: String,
        /// The offending raw value
        value: String,
    },
}
