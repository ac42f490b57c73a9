//! Last-Non-Direct Attribution
//!
//! For each user, take the last two rows of the full touchpoint history in
//! dataset order (conversions or not), keep only those flagged as
//! conversions, then credit the first surviving row's channel. A user whose
//! final two touchpoints hold no conversion earns nothing.

use crate::AttributionModel;
use crate::error::ModelError;
use crate::table::{self, AttributionTable};
use karma_data::{Dataset, TouchEvent};
use std::collections::BTreeMap;
use tracing::info;

/// Last-non-direct attribution model.
#[derive(Debug, Default, Clone, Copy)]
pub struct LastNonDirectModel;

impl AttributionModel for LastNonDirectModel {
    fn name(&self) -> &'static str {
        "last_non_direct"
    }

    fn compute(&self, dataset: &Dataset) -> Result<AttributionTable, ModelError> {
        info!("running last-non-direct model");

        // Last two rows per user, preserving dataset order within the pair.
        let mut tails: BTreeMap<&str, Vec<&TouchEvent>> = BTreeMap::new();
        for event in dataset.events() {
            let tail = tails.entry(&event.user_id).or_default();
            tail.push(event);
            if tail.len() > 2 {
                tail.remove(0);
            }
        }

        let mut credits: BTreeMap<String, f64> = BTreeMap::new();
        for tail in tails.values() {
            if let Some(event) = tail.iter().find(|e| e.conversion) {
                *credits.entry(event.channel.clone()).or_default() += 1.0;
            }
        }

        Ok(table::from_credits(credits))
    }
}
