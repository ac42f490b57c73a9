//! Per-user channel paths.
//!
//! A "path" here is the set of distinct channels a user touched, not a
//! temporal sequence: the canonical pipeline sorts by channel name before
//! grouping, so ordering information is discarded on purpose. The
//! removal-effect and Shapley models consume these sets together with each
//! user's conversion count.

use karma_data::Dataset;
use std::collections::{BTreeMap, BTreeSet};

/// One user's deduplicated channel set and conversion total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserPath {
    /// User (cookie) identifier.
    pub user_id: String,

    /// Distinct channels the user touched, sorted by name.
    pub channels: BTreeSet<String>,

    /// Number of touchpoints flagged as conversions for this user.
    pub conversions: u64,
}

impl UserPath {
    /// Whether the user touched the given channel.
    pub fn contains(&self, channel: &str) -> bool {
        self.channels.contains(channel)
    }
}

/// Build one [`UserPath`] per distinct user, sorted by user id.
///
/// Users without any conversion still contribute a path with
/// `conversions == 0`; the removal-effect base rate divides by the full path
/// count.
pub fn build_user_paths(dataset: &Dataset) -> Vec<UserPath> {
    let mut grouped: BTreeMap<&str, (BTreeSet<String>, u64)> = BTreeMap::new();

    for event in dataset.events() {
        let entry = grouped.entry(&event.user_id).or_default();
        entry.0.insert(event.channel.clone());
        if event.conversion {
            entry.1 += 1;
        }
    }

    grouped
        .into_iter()
        .map(|(user_id, (channels, conversions))| UserPath {
            user_id: user_id.to_string(),
            channels,
            conversions,
        })
        .collect()
}
