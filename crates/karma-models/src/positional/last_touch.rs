//! Last-Touch Attribution
//!
//! Every conversion row credits its own channel with 1. No per-user grouping
//! is needed: in this scheme each conversion row already is "the last touch"
//! for the conversion it records.

use crate::AttributionModel;
use crate::error::ModelError;
use crate::table::{self, AttributionTable};
use karma_data::Dataset;
use std::collections::BTreeMap;
use tracing::info;

/// Last-touch attribution model.
#[derive(Debug, Default, Clone, Copy)]
pub struct LastTouchModel;

impl AttributionModel for LastTouchModel {
    fn name(&self) -> &'static str {
        "last_touch"
    }

    fn compute(&self, dataset: &Dataset) -> Result<AttributionTable, ModelError> {
        info!("running last-touch model");

        let mut credits: BTreeMap<String, f64> = BTreeMap::new();
        for event in dataset.events() {
            if event.conversion {
                *credits.entry(event.channel.clone()).or_default() += 1.0;
            }
        }

        Ok(table::from_credits(credits))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::positional::testutil::dataset;
    use approx::assert_relative_eq;

    #[test]
    fn test_counts_every_conversion_row() {
        let ds = dataset(&[
            ("u1", "Email", true),
            ("u1", "Display", false),
            ("u2", "Email", true),
            ("u2", "Search", true),
        ]);

        let table = LastTouchModel.compute(&ds).unwrap();
        assert_relative_eq!(table["Email"].credit, 2.0);
        assert_relative_eq!(table["Search"].credit, 1.0);
        assert_relative_eq!(table["Email"].weightage_pct, 66.67);
        assert_relative_eq!(table["Search"].weightage_pct, 33.33);
        assert!(!table.contains_key("Display"));
    }

    #[test]
    fn test_no_conversions_yields_empty_table() {
        let ds = dataset(&[("u1", "Email", false)]);
        let table = LastTouchModel.compute(&ds).unwrap();
        assert!(table.is_empty());
    }
}
