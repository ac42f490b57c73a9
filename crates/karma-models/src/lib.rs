#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/karma-attribution/karma/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod error;
pub mod paths;
pub mod positional;
pub mod registry;
pub mod removal;
pub mod shapley;
pub mod table;

pub use error::ModelError;
pub use paths::{UserPath, build_user_paths};
pub use positional::{
    FirstTouchModel, LastNonDirectModel, LastTouchModel, LinearModel, PositionDecayModel,
    UShapedModel,
};
pub use registry::{ModelInfo, ModelKind, available_models, shapley_info};
pub use removal::RemovalEffectModel;
pub use shapley::{ShapleyConfig, ShapleyModel};
pub use table::{AttributionTable, ChannelWeight, round2};

use karma_data::Dataset;

/// Trait implemented by every credit-assignment model.
///
/// A model reads the immutable dataset and produces a per-channel table of
/// credit and percentage weightage. Implementations are pure: re-running a
/// model against an unchanged dataset yields identical results.
pub trait AttributionModel {
    /// Stable identifier of the model (used as the serialized result key).
    fn name(&self) -> &'static str;

    /// Compute the per-channel attribution table.
    fn compute(&self, dataset: &Dataset) -> Result<AttributionTable, ModelError>;
}

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
