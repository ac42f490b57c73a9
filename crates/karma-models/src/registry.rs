//! Model Registry
//!
//! Central catalog of the attribution models the engine runs. Allows callers
//! to enumerate the models and their serialized result keys without
//! instantiating them.

/// Broad family a model belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelKind {
    /// Rule-based positional heuristics over the raw event log
    Positional,
    /// Path-coverage removal-effect estimation
    RemovalEffect,
    /// Cooperative-game (Shapley) coalition enumeration
    CooperativeGame,
}

/// Model metadata.
#[derive(Debug, Clone)]
pub struct ModelInfo {
    /// Model name (unique identifier, matches `AttributionModel::name`)
    pub name: &'static str,
    /// Key the model's percentages appear under in combined results
    pub result_key: &'static str,
    /// Model family
    pub kind: ModelKind,
    /// Brief description of the credit rule
    pub description: &'static str,
}

/// Get all available model info, in the canonical run order.
pub fn available_models() -> Vec<ModelInfo> {
    vec![
        ModelInfo {
            name: "last_touch",
            result_key: "LastTouch",
            kind: ModelKind::Positional,
            description: "Every conversion row credits its own channel",
        },
        ModelInfo {
            name: "first_touch",
            result_key: "FirstTouch",
            kind: ModelKind::Positional,
            description: "First conversion row per user earns the credit",
        },
        ModelInfo {
            name: "last_non_direct",
            result_key: "LastNonDirect",
            kind: ModelKind::Positional,
            description: "First conversion among each user's final two touchpoints",
        },
        ModelInfo {
            name: "linear",
            result_key: "Linear",
            kind: ModelKind::Positional,
            description: "Each of a user's k conversion rows earns 1/k",
        },
        ModelInfo {
            name: "u_shaped",
            result_key: "UShaped",
            kind: ModelKind::Positional,
            description: "40% to each endpoint, remainder split across the interior",
        },
        ModelInfo {
            name: "position_decay",
            result_key: "PositionDecay",
            kind: ModelKind::Positional,
            description: "Exponentially decaying weight by conversion rank",
        },
        ModelInfo {
            name: "markov",
            result_key: "Markov",
            kind: ModelKind::RemovalEffect,
            description: "Path-coverage removal effect scaled to total conversions",
        },
    ]
}

/// Get the Shapley model's metadata.
///
/// Kept out of [`available_models`] because the exponential coalition
/// enumeration is opt-in; the default engine run covers the seven models
/// above.
pub const fn shapley_info() -> ModelInfo {
    ModelInfo {
        name: "shapley",
        result_key: "Shapley",
        kind: ModelKind::CooperativeGame,
        description: "Exact Shapley value over channel coalitions",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seven_models_in_canonical_order() {
        let models = available_models();
        assert_eq!(models.len(), 7);
        assert_eq!(models[0].name, "last_touch");
        assert_eq!(models[6].name, "markov");
    }

    #[test]
    fn test_unique_names_and_keys() {
        let models = available_models();
        let mut names: Vec<_> = models.iter().map(|m| m.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), 7);
    }
}
