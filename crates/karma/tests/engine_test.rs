//! End-to-end tests of the engine boundary operations.

use karma::data::{DatasetSchema, read_events};
use karma::{AttributionEngine, BudgetRequest, optimize_budget};
use std::collections::BTreeMap;
use std::sync::Arc;

const SAMPLE_CSV: &str = "\
cookie,channel,conversion,conversion_value
u1,Facebook,0,0
u1,Paid Search,1,25.0
u1,Online Display,1,10.0
u2,Paid Search,1,40.0
u3,Facebook,1,15.0
u3,Online Display,0,0
";

fn engine_from_csv() -> AttributionEngine {
    let dataset = read_events(SAMPLE_CSV.as_bytes(), &DatasetSchema::default()).unwrap();
    AttributionEngine::new(Arc::new(dataset))
}

#[test]
fn test_run_attribution_end_to_end() {
    let response = engine_from_csv().run();
    assert!(response.success);

    let results = response.results.unwrap();
    assert_eq!(results.channels.len(), 3);

    let analytics = response.analytics.unwrap();
    assert_eq!(analytics.total_interactions, 6);
    assert_eq!(analytics.total_conversions, 4);
    assert_eq!(analytics.unique_users, 3);
    assert_eq!(analytics.conversion_rate_pct, 66.67);
    assert_eq!(analytics.channel_stats["Paid Search"].avg_conversion_value, 32.5);
}

#[test]
fn test_run_response_json_shape() {
    let response = engine_from_csv().run();
    let json = serde_json::to_value(&response).unwrap();

    assert_eq!(json["success"], true);
    assert!(json["results"]["Paid Search"].get("LastTouch").is_some());
    assert!(json["results"]["Paid Search"].get("Markov").is_some());
    assert!(json["results"]["Paid Search"].get("Mean").is_some());
    assert!(json["analytics"].get("channel_stats").is_some());
    assert!(json.get("error").is_none());
}

#[test]
fn test_budget_worked_example_with_caps() {
    let request = BudgetRequest {
        budget: 1000.0,
        channel_limits: [("A".to_string(), 500.0)].into_iter().collect(),
        mean_attributions: [("A".to_string(), 0.6), ("B".to_string(), 0.4)]
            .into_iter()
            .collect(),
    };

    let response = optimize_budget(&request);
    assert!(response.success);

    let allocations = response.allocations.unwrap();
    assert_eq!(allocations["A"], 500.0);
    assert_eq!(allocations["B"], 440.0);

    // Single-pass redistribution undershoots the budget when caps bind.
    let total: f64 = allocations.values().sum();
    assert_eq!(total, 940.0);
}

#[test]
fn test_budget_request_round_trip_json() {
    let raw = r#"{
        "budget": 1000,
        "channel_limits": {"Facebook": 250.0},
        "mean_attributions": {"Facebook": 14.29, "Paid Search": 22.1}
    }"#;
    let request: BudgetRequest = serde_json::from_str(raw).unwrap();
    let response = optimize_budget(&request);
    assert!(response.success);

    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(json["success"], true);
    assert!(json["allocations"].get("Paid Search").is_some());
}

#[test]
fn test_concurrent_runs_share_dataset() {
    let engine = engine_from_csv();
    let baseline = engine.run();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let engine = engine.clone();
            std::thread::spawn(move || engine.run())
        })
        .collect();

    for handle in handles {
        let response = handle.join().unwrap();
        assert_eq!(response.results, baseline.results);
    }
}

#[test]
fn test_empty_mean_attributions_fails_closed() {
    let request = BudgetRequest {
        budget: 1000.0,
        channel_limits: BTreeMap::new(),
        mean_attributions: BTreeMap::new(),
    };
    let response = optimize_budget(&request);
    assert!(!response.success);
    assert!(response.error.is_some());
}
