//! Linear Attribution
//!
//! Each of a user's k conversion rows credits its channel with 1/k, so every
//! converting user distributes exactly 1 unit of credit.

use crate::AttributionModel;
use crate::error::ModelError;
use crate::positional::conversion_rows_by_user;
use crate::table::{self, AttributionTable};
use karma_data::Dataset;
use std::collections::BTreeMap;
use tracing::info;

/// Linear attribution model.
#[derive(Debug, Default, Clone, Copy)]
pub struct LinearModel;

impl AttributionModel for LinearModel {
    fn name(&self) -> &'static str {
        "linear"
    }

    fn compute(&self, dataset: &Dataset) -> Result<AttributionTable, ModelError> {
        info!("running linear model");

        let mut credits: BTreeMap<String, f64> = BTreeMap::new();
        for rows in conversion_rows_by_user(dataset).values() {
            let share = 1.0 / rows.len() as f64;
            for event in rows {
                *credits.entry(event.channel.clone()).or_default() += share;
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
    fn test_each_user_distributes_one_unit() {
        let ds = dataset(&[
            ("u1", "Email", true),
            ("u1", "Search", true),
            ("u1", "Display", true),
            ("u2", "Email", true),
        ]);

        let table = LinearModel.compute(&ds).unwrap();
        // u1 splits 1 across three channels, u2 gives Email a full unit.
        assert_relative_eq!(table["Email"].credit, 1.0 + 1.0 / 3.0);
        assert_relative_eq!(table["Search"].credit, 1.0 / 3.0);
        assert_relative_eq!(table["Display"].credit, 1.0 / 3.0);

        let total: f64 = table.values().map(|w| w.credit).sum();
        assert_relative_eq!(total, 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_percentages_sum_to_100() {
        let ds = dataset(&[
            ("u1", "Email", true),
            ("u1", "Search", true),
            ("u2", "Display", true),
        ]);

        let table = LinearModel.compute(&ds).unwrap();
        let pct: f64 = table.values().map(|w| w.weightage_pct).sum();
        assert!((pct - 100.0).abs() < 0.01);
    }
}
