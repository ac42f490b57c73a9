//! Touchpoint events and the immutable dataset handle.
//!
//! A [`Dataset`] is created once at startup by the loader and treated as
//! process-wide, read-only state: every model run borrows it, none mutate it.
//! Row order is preserved from the source file because the positional
//! heuristics depend on dataset order.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A single marketing touchpoint for one user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TouchEvent {
    /// Identifier of the user (cookie) the touchpoint belongs to.
    pub user_id: String,

    /// Marketing channel the interaction occurred through.
    pub channel: String,

    /// Whether this touchpoint resulted in a conversion.
    pub conversion: bool,

    /// Monetary value of the conversion (0.0 for non-conversions).
    pub conversion_value: f64,
}

/// Immutable handle over the full touchpoint log.
///
/// Constructed once by [`crate::loader::load_csv`] and shared by reference
/// into every model call. Concurrent reads are safe; there is no interior
/// mutability.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    events: Vec<TouchEvent>,
}

impl Dataset {
    /// Create a dataset from already-parsed events, preserving their order.
    pub const fn new(events: Vec<TouchEvent>) -> Self {
        Self { events }
    }

    /// All events in original dataset order.
    pub fn events(&self) -> &[TouchEvent] {
        &self.events
    }

    /// Number of rows (interactions) in the dataset.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether the dataset has no rows.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of distinct users in the dataset.
    pub fn unique_users(&self) -> usize {
        self.events
            .iter()
            .map(|e| e.user_id.as_str())
            .collect::<BTreeSet<_>>()
            .len()
    }

    /// Distinct channels present in the dataset, sorted by name.
    pub fn channels(&self) -> BTreeSet<String> {
        self.events.iter().map(|e| e.channel.clone()).collect()
    }

    /// Number of rows flagged as conversions.
    pub fn total_conversions(&self) -> usize {
        self.events.iter().filter(|e| e.conversion).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(user: &str, channel: &str, conversion: bool) -> TouchEvent {
        TouchEvent {
            user_id: user.to_string(),
            channel: channel.to_string(),
            conversion,
            conversion_value: if conversion { 10.0 } else { 0.0 },
        }
    }

    #[test]
    fn test_dataset_accessors() {
        let ds = Dataset::new(vec![
            event("u1", "Paid Search", true),
            event("u1", "Display", false),
            event("u2", "Paid Search", false),
        ]);

        assert_eq!(ds.len(), 3);
        assert!(!ds.is_empty());
        assert_eq!(ds.unique_users(), 2);
        assert_eq!(ds.total_conversions(), 1);

        let channels: Vec<_> = ds.channels().into_iter().collect();
        assert_eq!(channels, vec!["Display", "Paid Search"]);
    }

    #[test]
    fn test_empty_dataset() {
        let ds = Dataset::new(vec![]);
        assert!(ds.is_empty());
        assert_eq!(ds.unique_users(), 0);
        assert_eq!(ds.total_conversions(), 0);
        assert!(ds.channels().is_empty());
    }
}
