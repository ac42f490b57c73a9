//! Per-channel attribution tables.
//!
//! Every model reduces to the same output shape: a sorted map from channel
//! name to raw credit plus a percentage weightage. When the total credit is
//! positive the percentages sum to 100 up to rounding; otherwise the table is
//! all zeros (the guarded degenerate case).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Credit assigned to one channel by one model.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ChannelWeight {
    /// Raw (fractional) conversion credit.
    pub credit: f64,

    /// Share of the model's total credit, in percent, rounded to 2 decimals.
    pub weightage_pct: f64,
}

/// A model's full output: channel name to credit and weightage, sorted by
/// channel name for deterministic iteration.
pub type AttributionTable = BTreeMap<String, ChannelWeight>;

/// Round to 2 decimal places, half away from zero.
pub fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// Build a table from raw per-channel credits, normalizing to percentages.
///
/// Percentages are `credit / total * 100` rounded to 2 decimals. When the
/// total credit is not positive every weightage is 0.0.
pub fn from_credits(credits: BTreeMap<String, f64>) -> AttributionTable {
    let total: f64 = credits.values().sum();
    credits
        .into_iter()
        .map(|(channel, credit)| {
            let weightage_pct = if total > 0.0 {
                round2(credit / total * 100.0)
            } else {
                0.0
            };
            (channel, ChannelWeight { credit, weightage_pct })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_round2() {
        assert_eq!(round2(33.333333), 33.33);
        assert_eq!(round2(66.666666), 66.67);
        assert_eq!(round2(0.005), 0.01);
    }

    #[test]
    fn test_from_credits_normalizes_to_100() {
        let mut credits = BTreeMap::new();
        credits.insert("A".to_string(), 2.0);
        credits.insert("B".to_string(), 1.0);

        let table = from_credits(credits);
        assert_relative_eq!(table["A"].weightage_pct, 66.67);
        assert_relative_eq!(table["B"].weightage_pct, 33.33);

        let pct_sum: f64 = table.values().map(|w| w.weightage_pct).sum();
        assert!((pct_sum - 100.0).abs() < 0.01);
    }

    #[test]
    fn test_from_credits_zero_total_is_all_zero() {
        let mut credits = BTreeMap::new();
        credits.insert("A".to_string(), 0.0);
        credits.insert("B".to_string(), 0.0);

        let table = from_credits(credits);
        assert_eq!(table["A"].weightage_pct, 0.0);
        assert_eq!(table["B"].weightage_pct, 0.0);
    }
}
