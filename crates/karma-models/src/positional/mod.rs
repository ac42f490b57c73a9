//! Positional attribution heuristics.
//!
//! Six rule-based models that assign conversion credit from a row's position
//! within its user's touchpoint history. All of them operate on conversion
//! rows grouped by user in dataset order, aggregate credit by channel, and
//! normalize to percentages.

pub mod first_touch;
pub mod last_non_direct;
pub mod last_touch;
pub mod linear;
pub mod position_decay;
pub mod u_shaped;

pub use first_touch::FirstTouchModel;
pub use last_non_direct::LastNonDirectModel;
pub use last_touch::LastTouchModel;
pub use linear::LinearModel;
pub use position_decay::PositionDecayModel;
pub use u_shaped::UShapedModel;

use karma_data::{Dataset, TouchEvent};
use std::collections::BTreeMap;

/// Group conversion rows by user, preserving dataset order within each group.
pub(crate) fn conversion_rows_by_user(dataset: &Dataset) -> BTreeMap<&str, Vec<&TouchEvent>> {
    let mut grouped: BTreeMap<&str, Vec<&TouchEvent>> = BTreeMap::new();
    for event in dataset.events() {
        if event.conversion {
            grouped.entry(&event.user_id).or_default().push(event);
        }
    }
    grouped
}
