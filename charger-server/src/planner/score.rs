//! Reachability and priority scoring.
//!
//! Turns a (position, charger, range) triple into a [`ChargerResult`], or
//! nothing when the charger is out of safe reach. Unreachable chargers are
//! dropped here rather than flagged, so every result downstream has
//! `is_reachable == true`.

use std::sync::Arc;

use crate::domain::{Availability, Charger, ChargerResult, Coordinate, RemainingRange};
use crate::geo::distance_km;

use super::config::{PriorityWeights, RankingConfig};

/// Furthest a charger may be: range × safety buffer.
pub fn max_reachable_km(range: RemainingRange, config: &RankingConfig) -> f64 {
    range.km_f64() * config.safety_buffer
}

/// Inclusive threshold: a charger exactly at the limit is reachable.
pub fn is_reachable(distance_km: f64, range: RemainingRange, config: &RankingConfig) -> bool {
    distance_km <= max_reachable_km(range, config)
}

/// Range left on arrival, never negative.
///
/// Consumed range is the distance inflated by the real-world buffer
/// (≈ 0.2 kWh/km nominal plus 20%), truncated to whole kilometres.
pub fn arrival_range_km(range: RemainingRange, distance_km: f64, config: &RankingConfig) -> u32 {
    let consumed = (distance_km * config.consumption_buffer).floor();
    let left = range.km_f64() - consumed;
    if left.is_nan() || left <= 0.0 {
        0
    } else {
        left as u32
    }
}

/// Additive priority score, floored at zero.
pub fn priority(charger: &Charger, distance_km: f64, weights: &PriorityWeights) -> u32 {
    let mut score = weights.base;

    if charger.power_kw >= weights.ultra_fast_kw {
        score += weights.ultra_fast_bonus;
    } else if charger.power_kw >= weights.fast_kw {
        score += weights.fast_bonus;
    }

    score += match charger.availability {
        Availability::Available => weights.available,
        Availability::Unknown => weights.unknown,
        Availability::Occupied => weights.occupied,
        Availability::OutOfOrder => weights.out_of_order,
    };

    // Saturating cast: infinite or huge distances contribute nothing.
    let whole_km = distance_km.trunc() as i32;
    score += weights.proximity_horizon_km.saturating_sub(whole_km).max(0);

    if charger.amenities.has_fast_food {
        score += weights.fast_food_bonus;
    }
    if charger.amenities.has_restrooms {
        score += weights.restrooms_bonus;
    }

    if let Some(rating) = charger.user_rating {
        score += (rating * weights.rating_multiplier).round() as i32;
    }

    if charger.highway_access.requires_crossing {
        score += weights.crossing_penalty;
    }
    if charger.highway_access.distance_from_highway_m > weights.far_from_highway_m {
        score += weights.far_from_highway_penalty;
    }

    score.max(0) as u32
}

/// Score a charger from the driver's position.
pub fn score(
    position: &Coordinate,
    charger: &Arc<Charger>,
    range: RemainingRange,
    config: &RankingConfig,
) -> Option<ChargerResult> {
    let distance = distance_km(position, &charger.coordinate());
    score_at_distance(charger, distance, range, config)
}

/// Score a charger whose distance is already known.
pub fn score_at_distance(
    charger: &Arc<Charger>,
    distance_km: f64,
    range: RemainingRange,
    config: &RankingConfig,
) -> Option<ChargerResult> {
    if !is_reachable(distance_km, range, config) {
        return None;
    }

    Some(ChargerResult {
        charger: Arc::clone(charger),
        distance_km,
        time_to_reach: config.travel_time(distance_km),
        is_reachable: true,
        arrival_range_km: arrival_range_km(range, distance_km, config),
        priority: priority(charger, distance_km, &config.weights),
    })
}
