//! Shapley-Value Attribution
//!
//! Treats channels as players in a cooperative game where a coalition's value
//! is the number of conversions among users whose channel set contains every
//! coalition member (superset matching, not exact matching, and the empty
//! coalition is worth 0 by definition). Each channel's Shapley value is its
//! exact marginal contribution averaged over every subset of the remaining
//! channels, weighted 1 / (n * C(n-1, |T|)).
//!
//! Enumeration is O(n * 2^n) in the channel cardinality n, so the model
//! refuses to run past a configured ceiling instead of hanging the process.
//! Negative values are clamped to 0 before normalization; the sum of credits
//! therefore need not equal the total conversion count (the efficiency axiom
//! is intentionally broken, matching observed behavior).

use crate::AttributionModel;
use crate::error::ModelError;
use crate::paths::build_user_paths;
use crate::table::{self, AttributionTable};
use karma_data::Dataset;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, info};

/// Largest ceiling the bitmask enumeration supports.
const MAX_SUPPORTED_CHANNELS: usize = 32;

/// Configuration for the Shapley model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShapleyConfig {
    /// Maximum channel cardinality the model will enumerate (default: 16).
    ///
    /// At n channels the model evaluates n * 2^(n-1) marginal contributions;
    /// the default keeps a worst-case run in the hundreds of thousands of
    /// coalition evaluations.
    pub max_channels: usize,
}

impl Default for ShapleyConfig {
    fn default() -> Self {
        Self { max_channels: 16 }
    }
}

/// Exact Shapley-value attribution model.
#[derive(Debug)]
pub struct ShapleyModel {
    config: ShapleyConfig,
}

impl ShapleyModel {
    /// Create a new Shapley model with the given configuration.
    pub fn new(config: ShapleyConfig) -> Result<Self, ModelError> {
        if config.max_channels == 0 || config.max_channels > MAX_SUPPORTED_CHANNELS {
            return Err(ModelError::InvalidConfig(format!(
                "max_channels must be in 1..={MAX_SUPPORTED_CHANNELS}, got {}",
                config.max_channels
            )));
        }
        Ok(Self { config })
    }

    /// Create with the default configuration.
    ///
    /// # Errors
    /// Returns an error if the default configuration is invalid (should not happen).
    pub fn try_default() -> Result<Self, ModelError> {
        Self::new(ShapleyConfig::default())
    }

    /// The configured channel ceiling.
    pub const fn max_channels(&self) -> usize {
        self.config.max_channels
    }
}

/// Value of the coalition encoded by `mask`: conversions among paths whose
/// channel set is a superset of the coalition. The empty coalition is 0.
fn coalition_value(mask: u64, path_masks: &[(u64, f64)]) -> f64 {
    if mask == 0 {
        return 0.0;
    }
    path_masks
        .iter()
        .filter(|(path, _)| path & mask == mask)
        .map(|(_, conversions)| conversions)
        .sum()
}

fn binomial(n: usize, k: usize) -> f64 {
    let k = k.min(n - k);
    let mut result = 1.0;
    for i in 0..k {
        result = result * (n - i) as f64 / (i + 1) as f64;
    }
    result
}

impl AttributionModel for ShapleyModel {
    fn name(&self) -> &'static str {
        "shapley"
    }

    fn compute(&self, dataset: &Dataset) -> Result<AttributionTable, ModelError> {
        info!("running shapley model");

        let paths = build_user_paths(dataset);
        let channels: Vec<String> = paths
            .iter()
            .flat_map(|p| p.channels.iter().cloned())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let n = channels.len();
        if n == 0 {
            return Ok(AttributionTable::new());
        }
        if n > self.config.max_channels {
            return Err(ModelError::TooManyChannels {
                count: n,
                max: self.config.max_channels,
            });
        }

        let index: BTreeMap<&str, usize> = channels
            .iter()
            .enumerate()
            .map(|(i, ch)| (ch.as_str(), i))
            .collect();

        // Encode each path as a channel bitmask alongside its conversions.
        let path_masks: Vec<(u64, f64)> = paths
            .iter()
            .map(|p| {
                let mask = p
                    .channels
                    .iter()
                    .fold(0u64, |m, ch| m | 1 << index[ch.as_str()]);
                (mask, p.conversions as f64)
            })
            .collect();

        let mut credits: BTreeMap<String, f64> = BTreeMap::new();
        for (i, channel) in channels.iter().enumerate() {
            let member = 1u64 << i;
            let others = ((1u64 << n) - 1) & !member;

            let mut shapley = 0.0;
            // Enumerate every subset T of the other channels, including the
            // empty set and the full set.
            let mut subset = others;
            loop {
                let size = subset.count_ones() as usize;
                let weight = 1.0 / (n as f64 * binomial(n - 1, size));
                let with_channel = coalition_value(subset | member, &path_masks);
                let without_channel = coalition_value(subset, &path_masks);
                shapley += weight * (with_channel - without_channel);

                if subset == 0 {
                    break;
                }
                subset = (subset - 1) & others;
            }

            credits.insert(channel.clone(), shapley.max(0.0));
        }

        debug!(channels = n, "shapley enumeration complete");
        Ok(table::from_credits(credits))
    }
}
