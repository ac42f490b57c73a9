#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/karma-attribution/karma/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod analytics;
pub mod budget;
pub mod combine;
pub mod export;
pub mod report;

pub use analytics::{AnalyticsSummary, ChannelStats, summarize};
pub use budget::{BudgetError, BudgetPlan, allocate};
pub use combine::{CombinedAttribution, ModelBreakdown, ModelTables};
pub use export::{ExportError, ExportFormat, Exporter};
pub use report::{Report, ReportBuilder, ReportError};

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
