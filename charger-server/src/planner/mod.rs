//! Charger planner: filter, score and rank a candidate set.
//!
//! Answers "which chargers ahead of me can I safely reach, best first?"
//! for a known position, direction and remaining range. Pure and
//! synchronous; data retrieval and fallbacks live in [`crate::finder`].

mod config;
mod filter;
mod rank;
mod score;

#[cfg(test)]
pub(crate) mod test_support;

pub use config::{PriorityWeights, RankingConfig};
pub use filter::{is_accessible, is_ahead, passes};
pub use rank::{
    filter_by_availability, filter_by_fast_food, filter_by_min_power, group_by_highway_segment,
    rank,
};
pub use score::{
    arrival_range_km, is_reachable, max_reachable_km, priority, score, score_at_distance,
};
