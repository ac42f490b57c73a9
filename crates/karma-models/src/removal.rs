//! Removal-Effect Attribution ("markov")
//!
//! Estimates channel importance from how path coverage changes when a channel
//! is excluded from the channel universe. For each channel the model compares
//! the base conversion rate (total conversions over path count) against the
//! fraction of paths that survive removing the channel; the difference is the
//! channel's removal effect, and effects are rescaled so their credits sum to
//! the total conversion count.
//!
//! Despite the serialized "markov" key this is not a transition model: paths
//! are unordered channel sets, and the "removal conversion rate" is raw path
//! coverage rather than the conversion rate among surviving paths. Both
//! simplifications are preserved deliberately; downstream results depend on
//! them.

use crate::AttributionModel;
use crate::error::ModelError;
use crate::paths::build_user_paths;
use crate::table::{self, AttributionTable};
use karma_data::Dataset;
use std::collections::{BTreeMap, BTreeSet};
use tracing::info;

/// Removal-effect attribution model.
#[derive(Debug, Default, Clone, Copy)]
pub struct RemovalEffectModel;

impl AttributionModel for RemovalEffectModel {
    fn name(&self) -> &'static str {
        "markov"
    }

    fn compute(&self, dataset: &Dataset) -> Result<AttributionTable, ModelError> {
        info!("running removal-effect model");

        let paths = build_user_paths(dataset);
        if paths.is_empty() {
            return Ok(AttributionTable::new());
        }

        let n = paths.len() as f64;
        let total_conversions: f64 = paths.iter().map(|p| p.conversions as f64).sum();
        let base_rate = total_conversions / n;

        let channels: BTreeSet<&str> = paths
            .iter()
            .flat_map(|p| p.channels.iter().map(String::as_str))
            .collect();

        let mut effects: BTreeMap<String, f64> = BTreeMap::new();
        for channel in channels {
            let survivors = paths.iter().filter(|p| !p.contains(channel)).count();
            // A channel present in every path keeps the full base rate.
            let effect = if survivors > 0 {
                base_rate - survivors as f64 / n
            } else {
                base_rate
            };
            effects.insert(channel.to_string(), effect);
        }

        let effect_sum: f64 = effects.values().sum();
        let credits: BTreeMap<String, f64> = effects
            .into_iter()
            .map(|(channel, effect)| {
                let credit = if effect_sum > 0.0 {
                    effect / effect_sum * total_conversions
                } else {
                    0.0
                };
                (channel, credit)
            })
            .collect();

        Ok(table::from_credits(credits))
    }
}
