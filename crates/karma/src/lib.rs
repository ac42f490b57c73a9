#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/karma-attribution/karma/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod engine;

// Re-export main types from sub-crates
pub use karma_data as data;
pub use karma_models as models;
pub use karma_output as output;

pub use engine::{
    AttributionEngine, AttributionRunResponse, BudgetRequest, BudgetResponse, optimize_budget,
};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
