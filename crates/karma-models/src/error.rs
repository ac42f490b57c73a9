//! Error types for model runs.

use thiserror::Error;

/// Errors that can occur while configuring or running an attribution model.
///
/// Degenerate inputs (empty dataset, zero total credit) are not errors: the
/// models guard them and return defined all-zero tables instead.
#[derive(Debug, Error)]
pub enum ModelError {
    /// Channel cardinality exceeds the coalition-enumeration ceiling
    #[error(
        "channel cardinality {count} exceeds the Shapley enumeration ceiling of {max}; \
         exact coalition enumeration is O(n * 2^n) and is refused beyond the ceiling"
    )]
    TooManyChannels {
        /// Distinct channels found in the dataset
        count: usize,
        /// Configured ceiling
        max: usize,
    },

    /// Invalid model configuration
    #[error("invalid model configuration: {0}")]
    InvalidConfig(String),
}
