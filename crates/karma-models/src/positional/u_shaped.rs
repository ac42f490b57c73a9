//! U-Shaped (Position-Based) Attribution
//!
//! Per user, conversion rows ranked 1..k in dataset order earn:
//! 1.0 when k = 1; 0.4 at either endpoint; 0.2 / (k - 2) in the interior.
//!
//! The k = 2 case sums to 0.8 per user, not 1.0: both rows are endpoints and
//! the model does not renormalize. That quirk is part of the model's observed
//! contract and is pinned by tests.

use crate::AttributionModel;
use crate::error::ModelError;
use crate::positional::conversion_rows_by_user;
use crate::table::{self, AttributionTable};
use karma_data::Dataset;
use std::collections::BTreeMap;
use tracing::info;

/// U-shaped attribution model.
#[derive(Debug, Default, Clone, Copy)]
pub struct UShapedModel;

fn position_credit(rank: usize, count: usize) -> f64 {
    if count == 1 {
        1.0
    } else if rank == 1 || rank == count {
        0.4
    } else if count > 2 {
        0.2 / (count - 2) as f64
    } else {
        0.2
    }
}

impl AttributionModel for UShapedModel {
    fn name(&self) -> &'static str {
        "u_shaped"
    }

    fn compute(&self, dataset: &Dataset) -> Result<AttributionTable, ModelError> {
        info!("running u-shaped model");

        let mut credits: BTreeMap<String, f64> = BTreeMap::new();
        for rows in conversion_rows_by_user(dataset).values() {
            let count = rows.len();
            for (i, event) in rows.iter().enumerate() {
                *credits.entry(event.channel.clone()).or_default() +=
                    position_credit(i + 1, count);
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
    fn test_single_conversion_gets_full_credit() {
        let ds = dataset(&[("u1", "Email", true)]);
        let table = UShapedModel.compute(&ds).unwrap();
        assert_relative_eq!(table["Email"].credit, 1.0);
    }

    #[test]
    fn test_two_conversions_sum_to_point_eight() {
        let ds = dataset(&[("u1", "Email", true), ("u1", "Search", true)]);
        let table = UShapedModel.compute(&ds).unwrap();
        assert_relative_eq!(table["Email"].credit, 0.4);
        assert_relative_eq!(table["Search"].credit, 0.4);

        // Per-user total is 0.8, not 1.0; percentages still split 50/50.
        let total: f64 = table.values().map(|w| w.credit).sum();
        assert_relative_eq!(total, 0.8);
        assert_relative_eq!(table["Email"].weightage_pct, 50.0);
    }

    #[test]
    fn test_endpoints_and_interior() {
        let ds = dataset(&[
            ("u1", "Email", true),
            ("u1", "Display", true),
            ("u1", "Social", true),
            ("u1", "Search", true),
        ]);

        let table = UShapedModel.compute(&ds).unwrap();
        assert_relative_eq!(table["Email"].credit, 0.4);
        assert_relative_eq!(table["Search"].credit, 0.4);
        assert_relative_eq!(table["Display"].credit, 0.1);
        assert_relative_eq!(table["Social"].credit, 0.1);

        let total: f64 = table.values().map(|w| w.credit).sum();
        assert_relative_eq!(total, 1.0, epsilon = 1e-12);
    }
}
