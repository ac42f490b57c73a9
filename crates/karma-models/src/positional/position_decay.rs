//! Position-Decay Attribution
//!
//! Per user, the conversion row at rank r of k gets raw weight 2^(k - r), so
//! the earliest conversion carries the most weight and each later one halves
//! it. Raw weights are normalized by the per-user sum, making every user's
//! total exactly 1.

use crate::AttributionModel;
use crate::error::ModelError;
use crate::positional::conversion_rows_by_user;
use crate::table::{self, AttributionTable};
use karma_data::Dataset;
use std::collections::BTreeMap;
use tracing::info;

/// Exponential position-decay attribution model.
#[derive(Debug, Default, Clone, Copy)]
pub struct PositionDecayModel;

impl AttributionModel for PositionDecayModel {
    fn name(&self) -> &'static str {
        "position_decay"
    }

    fn compute(&self, dataset: &Dataset) -> Result<AttributionTable, ModelError> {
        info!("running position-decay model");

        let mut credits: BTreeMap<String, f64> = BTreeMap::new();
        for rows in conversion_rows_by_user(dataset).values() {
            let count = rows.len();
            let weights: Vec<f64> = (1..=count)
                .map(|rank| 2f64.powi((count - rank) as i32))
                .collect();
            let total: f64 = weights.iter().sum();

            for (event, weight) in rows.iter().zip(&weights) {
                *credits.entry(event.channel.clone()).or_default() += weight / total;
            }
        }

        Ok(table::from_credits(credits))
    }
}
