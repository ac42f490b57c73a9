//! Descriptive channel analytics.
//!
//! Simple counts and rates alongside the attribution results: how often each
//! channel appeared, how often it converted, and what a conversion through it
//! was worth on average. No modeling here.

use karma_data::Dataset;
use karma_models::round2;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Descriptive statistics for one channel.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChannelStats {
    /// Number of touchpoints through this channel.
    pub interactions: u64,

    /// Number of those flagged as conversions.
    pub conversions: u64,

    /// Conversions over interactions, in percent, rounded to 2 decimals.
    #[serde(rename = "conversion_rate")]
    pub conversion_rate_pct: f64,

    /// Mean conversion value over this channel's conversion rows.
    pub avg_conversion_value: f64,
}

/// Dataset-wide analytics plus per-channel statistics.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalyticsSummary {
    /// Total conversion rows in the dataset.
    pub total_conversions: u64,

    /// Total rows in the dataset.
    pub total_interactions: u64,

    /// Overall conversion rate in percent, rounded to 2 decimals.
    #[serde(rename = "conversion_rate")]
    pub conversion_rate_pct: f64,

    /// Number of distinct users.
    pub unique_users: u64,

    /// Per-channel statistics, keyed by channel name.
    pub channel_stats: BTreeMap<String, ChannelStats>,
}

/// Summarize the dataset over the given channel set.
///
/// The channel set is normally the union of channels produced by the models,
/// so the analytics line up row-for-row with the combined attribution table.
pub fn summarize(dataset: &Dataset, channels: &BTreeSet<String>) -> AnalyticsSummary {
    let total_interactions = dataset.len() as u64;
    let total_conversions = dataset.total_conversions() as u64;
    let conversion_rate_pct = if total_interactions > 0 {
        round2(total_conversions as f64 / total_interactions as f64 * 100.0)
    } else {
        0.0
    };

    let channel_stats = channels
        .iter()
        .map(|channel| {
            let mut interactions = 0u64;
            let mut conversions = 0u64;
            let mut value_sum = 0.0;

            for event in dataset.events() {
                if event.channel == *channel {
                    interactions += 1;
                    if event.conversion {
                        conversions += 1;
                        value_sum += event.conversion_value;
                    }
                }
            }

            let rate = if interactions > 0 {
                round2(conversions as f64 / interactions as f64 * 100.0)
            } else {
                0.0
            };
            let avg_value = if conversions > 0 {
                round2(value_sum / conversions as f64)
            } else {
                0.0
            };

            (
                channel.clone(),
                ChannelStats {
                    interactions,
                    conversions,
                    conversion_rate_pct: rate,
                    avg_conversion_value: avg_value,
                },
            )
        })
        .collect();

    AnalyticsSummary {
        total_conversions,
        total_interactions,
        conversion_rate_pct,
        unique_users: dataset.unique_users() as u64,
        channel_stats,
    }
}
