//! Proportional budget allocation.
//!
//! Turns per-channel weights (typically the aggregator's mean credit) into a
//! spend plan: weights are normalized, the budget is split proportionally,
//! channels are clamped to their caps, and the shortfall left by clamping is
//! redistributed once to channels that are uncapped or still below their cap,
//! in proportion to their ORIGINAL normalized weight.
//!
//! The redistribution pass runs exactly once: a channel pushed over its cap
//! by the pass is not re-clamped, and with binding caps the final total can
//! fall short of the requested budget. Both properties are part of the
//! allocator's contract and are pinned by tests.

use karma_models::round2;
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::info;

/// Final spend per channel, rounded to 2 decimals.
pub type BudgetPlan = BTreeMap<String, f64>;

/// Errors that can occur during budget allocation.
#[derive(Debug, Error)]
pub enum BudgetError {
    /// The requested budget is not a positive finite number
    #[error("budget must be a positive finite number, got {0}")]
    InvalidBudget(f64),

    /// No channel carries any weight, so proportions are undefined
    #[error("all channel weights are zero; cannot derive allocation proportions")]
    ZeroWeights,
}

/// Allocate `budget` across channels proportionally to `weights`, honoring
/// per-channel `caps`.
pub fn allocate(
    budget: f64,
    weights: &BTreeMap<String, f64>,
    caps: &BTreeMap<String, f64>,
) -> Result<BudgetPlan, BudgetError> {
    if !budget.is_finite() || budget <= 0.0 {
        return Err(BudgetError::InvalidBudget(budget));
    }

    let weight_sum: f64 = weights.values().sum();
    if weight_sum <= 0.0 {
        return Err(BudgetError::ZeroWeights);
    }

    let normalized: BTreeMap<&str, f64> = weights
        .iter()
        .map(|(ch, w)| (ch.as_str(), w / weight_sum))
        .collect();

    let mut allocations: BTreeMap<&str, f64> = normalized
        .iter()
        .map(|(ch, w)| (*ch, w * budget))
        .collect();

    for (channel, alloc) in &mut allocations {
        if let Some(cap) = caps.get(*channel) {
            if *alloc > *cap {
                *alloc = *cap;
            }
        }
    }

    let allocated: f64 = allocations.values().sum();
    let remaining = budget - allocated;
    if remaining > 0.0 {
        for (channel, alloc) in &mut allocations {
            let open = caps.get(*channel).is_none_or(|cap| *alloc < *cap);
            if open {
                *alloc += remaining * normalized[*channel];
            }
        }
    }

    let plan: BudgetPlan = allocations
        .into_iter()
        .map(|(ch, alloc)| (ch.to_string(), round2(alloc)))
        .collect();

    info!(channels = plan.len(), budget, "budget allocation complete");
    Ok(plan)
}
