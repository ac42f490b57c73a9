//! Combined attribution results.
//!
//! Merges the seven per-model tables into one per-channel view. The channel
//! set is the union across models; a channel missing from a model's table
//! contributes 0.0 for that model. The mean is the arithmetic average of the
//! seven already-rounded percentages, rounded again to 2 decimals; rounding
//! error deliberately compounds across the stages rather than being smoothed
//! out, because downstream budget plans are built from these exact numbers.

use karma_models::{AttributionTable, round2};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use tracing::debug;

/// The seven per-model tables the aggregator consumes, in canonical order.
#[derive(Debug, Clone, Default)]
pub struct ModelTables {
    /// Last-touch output.
    pub last_touch: AttributionTable,
    /// First-touch output.
    pub first_touch: AttributionTable,
    /// Last-non-direct output.
    pub last_non_direct: AttributionTable,
    /// Linear output.
    pub linear: AttributionTable,
    /// U-shaped output.
    pub u_shaped: AttributionTable,
    /// Position-decay output.
    pub position_decay: AttributionTable,
    /// Removal-effect ("markov") output.
    pub markov: AttributionTable,
}

impl ModelTables {
    fn pct(table: &AttributionTable, channel: &str) -> f64 {
        table.get(channel).map_or(0.0, |w| w.weightage_pct)
    }

    fn channel_union(&self) -> BTreeSet<String> {
        [
            &self.last_touch,
            &self.first_touch,
            &self.last_non_direct,
            &self.linear,
            &self.u_shaped,
            &self.position_decay,
            &self.markov,
        ]
        .into_iter()
        .flat_map(|t| t.keys().cloned())
        .collect()
    }
}

/// One channel's percentage under each model, plus the blended mean.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct ModelBreakdown {
    /// Last-touch weightage percent.
    pub last_touch: f64,
    /// First-touch weightage percent.
    pub first_touch: f64,
    /// Last-non-direct weightage percent.
    pub last_non_direct: f64,
    /// Linear weightage percent.
    pub linear: f64,
    /// U-shaped weightage percent.
    pub u_shaped: f64,
    /// Position-decay weightage percent.
    pub position_decay: f64,
    /// Removal-effect weightage percent.
    pub markov: f64,
    /// Arithmetic mean of the seven rounded percentages, rounded to 2 decimals.
    pub mean: f64,
}

impl ModelBreakdown {
    const MODEL_COUNT: f64 = 7.0;

    fn values(&self) -> [f64; 7] {
        [
            self.last_touch,
            self.first_touch,
            self.last_non_direct,
            self.linear,
            self.u_shaped,
            self.position_decay,
            self.markov,
        ]
    }
}

/// Combined attribution across all models, keyed by channel.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct CombinedAttribution {
    /// Per-channel breakdowns, sorted by channel name.
    pub channels: BTreeMap<String, ModelBreakdown>,
}

impl CombinedAttribution {
    /// Merge the seven per-model tables into the combined view.
    pub fn combine(tables: &ModelTables) -> Self {
        let union = tables.channel_union();
        debug!(channels = union.len(), "combining model results");

        let channels = union
            .into_iter()
            .map(|channel| {
                let mut breakdown = ModelBreakdown {
                    last_touch: ModelTables::pct(&tables.last_touch, &channel),
                    first_touch: ModelTables::pct(&tables.first_touch, &channel),
                    last_non_direct: ModelTables::pct(&tables.last_non_direct, &channel),
                    linear: ModelTables::pct(&tables.linear, &channel),
                    u_shaped: ModelTables::pct(&tables.u_shaped, &channel),
                    position_decay: ModelTables::pct(&tables.position_decay, &channel),
                    markov: ModelTables::pct(&tables.markov, &channel),
                    mean: 0.0,
                };
                breakdown.mean = round2(
                    breakdown.values().iter().sum::<f64>() / ModelBreakdown::MODEL_COUNT,
                );
                (channel, breakdown)
            })
            .collect();

        Self { channels }
    }

    /// Mean credit per channel, the usual input to the budget allocator.
    pub fn mean_attributions(&self) -> BTreeMap<String, f64> {
        self.channels
            .iter()
            .map(|(channel, b)| (channel.clone(), b.mean))
            .collect()
    }

    /// Format as ASCII table for terminal display.
    pub fn to_ascii_table(&self) -> String {
        let mut output = String::new();

        output.push_str("\nMulti-Touch Attribution (weightage % per model)\n");
        output.push_str(&"=".repeat(118));
        output.push('\n');
        output.push_str(&format!(
            "{:<20} {:>11} {:>11} {:>13} {:>11} {:>11} {:>14} {:>11} {:>11}\n",
            "Channel",
            "LastTouch",
            "FirstTouch",
            "LastNonDirect",
            "Linear",
            "UShaped",
            "PositionDecay",
            "Markov",
            "Mean"
        ));
        output.push_str(&"-".repeat(118));
        output.push('\n');

        for (channel, b) in &self.channels {
            output.push_str(&format!(
                "{:<20} {:>11.2} {:>11.2} {:>13.2} {:>11.2} {:>11.2} {:>14.2} {:>11.2} {:>11.2}\n",
                channel,
                b.last_touch,
                b.first_touch,
                b.last_non_direct,
                b.linear,
                b.u_shaped,
                b.position_decay,
                b.markov,
                b.mean
            ));
        }

        output.push_str(&"=".repeat(118));
        output.push('\n');
        output
    }

    /// Format as Markdown table for documentation.
    pub fn to_markdown(&self) -> String {
        let mut output = String::new();

        output.push_str("# Multi-Touch Attribution\n\n");
        output.push_str(
            "| Channel | LastTouch | FirstTouch | LastNonDirect | Linear | UShaped | PositionDecay | Markov | Mean |\n",
        );
        output.push_str(
            "|---------|-----------|------------|---------------|--------|---------|---------------|--------|------|\n",
        );

        for (channel, b) in &self.channels {
            output.push_str(&format!(
                "| {} | {:.2} | {:.2} | {:.2} | {:.2} | {:.2} | {:.2} | {:.2} | {:.2} |\n",
                channel,
                b.last_touch,
                b.first_touch,
                b.last_non_direct,
                b.linear,
                b.u_shaped,
                b.position_decay,
                b.markov,
                b.mean
            ));
        }

        output
    }
}

impl fmt::Display for CombinedAttribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (channel, b) in &self.channels {
            writeln!(f, "{}: mean {:.2}%", channel, b.mean)?;
        }
        Ok(())
    }
}
