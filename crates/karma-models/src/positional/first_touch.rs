//! First-Touch Attribution
//!
//! For each user, only the first conversion row in dataset order earns
//! credit; later conversions by the same user are ignored.

use crate::AttributionModel;
use crate::error::ModelError;
use crate::table::{self, AttributionTable};
use karma_data::Dataset;
use std::collections::{BTreeMap, BTreeSet};
use tracing::info;

/// First-touch attribution model.
#[derive(Debug, Default, Clone, Copy)]
pub struct FirstTouchModel;

impl AttributionModel for FirstTouchModel {
    fn name(&self) -> &'static str {
        "first_touch"
    }

    fn compute(&self, dataset: &Dataset) -> Result<AttributionTable, ModelError> {
        info!("running first-touch model");

        let mut credited: BTreeSet<&str> = BTreeSet::new();
        let mut credits: BTreeMap<String, f64> = BTreeMap::new();

        for event in dataset.events() {
            if event.conversion && credited.insert(&event.user_id) {
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
    fn test_only_first_conversion_per_user() {
        let ds = dataset(&[
            ("u1", "Display", false),
            ("u1", "Email", true),
            ("u1", "Search", true),
            ("u2", "Search", true),
        ]);

        let table = FirstTouchModel.compute(&ds).unwrap();
        assert_relative_eq!(table["Email"].credit, 1.0);
        assert_relative_eq!(table["Search"].credit, 1.0);
        assert_relative_eq!(table["Email"].weightage_pct, 50.0);
    }

    #[test]
    fn test_non_conversion_rows_never_credit() {
        let ds = dataset(&[("u1", "Display", false), ("u1", "Email", true)]);
        let table = FirstTouchModel.compute(&ds).unwrap();
        assert!(!table.contains_key("Display"));
        assert_relative_eq!(table["Email"].weightage_pct, 100.0);
    }
}
