//! The engine boundary: run attribution, optimize budget.
//!
//! [`AttributionEngine`] holds a shared handle to the immutable dataset and
//! recomputes everything fresh on every call; all intermediate tables are
//! call-local, so concurrent runs against the same dataset are safe. Failures
//! never cross the boundary as panics: both operations return
//! `success`-shaped responses, and a failure in any one model aborts the
//! whole run with no partial results.
//!
//! The failure diagnostic carries the error display chain only; full detail
//! stays in the server-side log.

use karma_data::Dataset;
use karma_models::{
    AttributionModel, FirstTouchModel, LastNonDirectModel, LastTouchModel, LinearModel,
    ModelError, PositionDecayModel, RemovalEffectModel, UShapedModel,
};
use karma_output::{
    AnalyticsSummary, CombinedAttribution, ModelTables, allocate, summarize,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{error, info};

/// Response of the run-attribution operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttributionRunResponse {
    /// Whether the run completed.
    pub success: bool,

    /// Combined per-channel results (present on success).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub results: Option<CombinedAttribution>,

    /// Descriptive analytics (present on success).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analytics: Option<AnalyticsSummary>,

    /// Error message (present on failure).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Error detail chain (present on failure).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnostic: Option<String>,
}

/// Request of the optimize-budget operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetRequest {
    /// Total budget to distribute.
    pub budget: f64,

    /// Optional per-channel spend caps (sparse).
    #[serde(default)]
    pub channel_limits: BTreeMap<String, f64>,

    /// Per-channel weights, typically the combined result's mean credit.
    pub mean_attributions: BTreeMap<String, f64>,
}

/// Response of the optimize-budget operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetResponse {
    /// Whether the allocation completed.
    pub success: bool,

    /// Final spend per channel (present on success).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allocations: Option<BTreeMap<String, f64>>,

    /// Error message (present on failure).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// The attribution engine over one immutable dataset.
#[derive(Debug, Clone)]
pub struct AttributionEngine {
    dataset: Arc<Dataset>,
}

impl AttributionEngine {
    /// Create an engine over a shared dataset handle.
    pub const fn new(dataset: Arc<Dataset>) -> Self {
        Self { dataset }
    }

    /// The dataset this engine computes over.
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Run all seven models, combine their tables, and summarize analytics.
    ///
    /// Any model failure aborts the whole operation; no partial per-model
    /// results are returned.
    pub fn run(&self) -> AttributionRunResponse {
        info!(rows = self.dataset.len(), "starting attribution analysis");

        match self.run_models() {
            Ok((results, analytics)) => {
                info!("attribution analysis completed");
                AttributionRunResponse {
                    success: true,
                    results: Some(results),
                    analytics: Some(analytics),
                    error: None,
                    diagnostic: None,
                }
            }
            Err(err) => {
                error!(%err, "attribution analysis failed");
                AttributionRunResponse {
                    success: false,
                    results: None,
                    analytics: None,
                    error: Some(err.to_string()),
                    diagnostic: Some(error_chain(&err)),
                }
            }
        }
    }

    fn run_models(&self) -> Result<(CombinedAttribution, AnalyticsSummary), ModelError> {
        let dataset = self.dataset.as_ref();

        let tables = ModelTables {
            last_touch: LastTouchModel.compute(dataset)?,
            first_touch: FirstTouchModel.compute(dataset)?,
            last_non_direct: LastNonDirectModel.compute(dataset)?,
            linear: LinearModel.compute(dataset)?,
            u_shaped: UShapedModel.compute(dataset)?,
            position_decay: PositionDecayModel.compute(dataset)?,
            markov: RemovalEffectModel.compute(dataset)?,
        };

        let combined = CombinedAttribution::combine(&tables);
        let channels: std::collections::BTreeSet<String> =
            combined.channels.keys().cloned().collect();
        let analytics = summarize(dataset, &channels);

        Ok((combined, analytics))
    }
}

/// Run the budget allocator over a request, wrapping failures into the
/// response rather than propagating them.
pub fn optimize_budget(request: &BudgetRequest) -> BudgetResponse {
    info!(
        budget = request.budget,
        channels = request.mean_attributions.len(),
        "starting budget optimization"
    );

    match allocate(
        request.budget,
        &request.mean_attributions,
        &request.channel_limits,
    ) {
        Ok(allocations) => BudgetResponse {
            success: true,
            allocations: Some(allocations),
            error: None,
        },
        Err(err) => {
            error!(%err, "budget optimization failed");
            BudgetResponse {
                success: false,
                allocations: None,
                error: Some(err.to_string()),
            }
        }
    }
}

fn error_chain(err: &dyn std::error::Error) -> String {
    let mut chain = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        chain.push_str(": ");
        chain.push_str(&cause.to_string());
        source = cause.source();
    }
    chain
}

#[cfg(test)]
mod tests {
    use super::*;
    use karma_data::TouchEvent;

    fn event(user: &str, channel: &str, conversion: bool) -> TouchEvent {
        TouchEvent {
            user_id: user.to_string(),
            channel: channel.to_string(),
            conversion,
            conversion_value: if conversion { 10.0 } else { 0.0 },
        }
    }

    fn engine() -> AttributionEngine {
        AttributionEngine::new(Arc::new(Dataset::new(vec![
            event("u1", "Email", true),
            event("u1", "Search", true),
            event("u2", "Display", false),
            event("u2", "Search", true),
        ])))
    }

    #[test]
    fn test_run_success_shape() {
        let response = engine().run();
        assert!(response.success);
        assert!(response.error.is_none());

        let results = response.results.unwrap();
        assert!(results.channels.contains_key("Email"));
        assert!(results.channels.contains_key("Search"));

        let analytics = response.analytics.unwrap();
        assert_eq!(analytics.total_interactions, 4);
        assert_eq!(analytics.total_conversions, 3);
    }

    #[test]
    fn test_run_is_idempotent() {
        let engine = engine();
        let first = engine.run();
        let second = engine.run();
        assert_eq!(first.results, second.results);
        assert_eq!(first.analytics, second.analytics);
    }

    #[test]
    fn test_failure_serializes_without_partial_results() {
        let response = AttributionRunResponse {
            success: false,
            results: None,
            analytics: None,
            error: Some("boom".to_string()),
            diagnostic: Some("boom".to_string()),
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["success"], false);
        assert!(json.get("results").is_none());
    }

    #[test]
    fn test_optimize_budget_success() {
        let request = BudgetRequest {
            budget: 1000.0,
            channel_limits: BTreeMap::new(),
            mean_attributions: [("A".to_string(), 0.6), ("B".to_string(), 0.4)]
                .into_iter()
                .collect(),
        };

        let response = optimize_budget(&request);
        assert!(response.success);
        let allocations = response.allocations.unwrap();
        assert_eq!(allocations["A"], 600.0);
        assert_eq!(allocations["B"], 400.0);
    }

    #[test]
    fn test_optimize_budget_zero_weights_fails_closed() {
        let request = BudgetRequest {
            budget: 1000.0,
            channel_limits: BTreeMap::new(),
            mean_attributions: [("A".to_string(), 0.0)].into_iter().collect(),
        };

        let response = optimize_budget(&request);
        assert!(!response.success);
        assert!(response.allocations.is_none());
        assert!(response.error.is_some());
    }

    #[test]
    fn test_request_deserializes_with_sparse_limits() {
        let request: BudgetRequest = serde_json::from_str(
            r#"{"budget": 500.0, "mean_attributions": {"Email": 12.5}}"#,
        )
        .unwrap();
        assert!(request.channel_limits.is_empty());
        assert_eq!(request.mean_attributions["Email"], 12.5);
    }
}
