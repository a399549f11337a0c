//! Ranking configuration.

use std::time::Duration;

/// Additive priority weights.
///
/// The absolute values are tunable. What must hold is the ordering
/// available > unknown > occupied > out-of-order, and that closer and more
/// powerful chargers score higher.
#[derive(Debug, Clone, PartialEq)]
pub struct PriorityWeights {
    /// Starting score before any adjustment.
    pub base: i32,

    /// Bonus for chargers of at least `ultra_fast_kw`.
    pub ultra_fast_bonus: i32,
    pub ultra_fast_kw: u32,

    /// Bonus for chargers of at least `fast_kw` (and below `ultra_fast_kw`).
    pub fast_bonus: i32,
    pub fast_kw: u32,

    pub available: i32,
    pub unknown: i32,
    pub occupied: i32,
    pub out_of_order: i32,

    /// Proximity adds `max(0, proximity_horizon_km - distance)`.
    pub proximity_horizon_km: i32,

    pub fast_food_bonus: i32,
    pub restrooms_bonus: i32,

    /// Rating (0-5) is multiplied by this and rounded.
    pub rating_multiplier: f64,

    pub crossing_penalty: i32,
    pub far_from_highway_penalty: i32,
    /// Distances from the highway above this (metres) are penalised.
    pub far_from_highway_m: u32,
}

impl Default for PriorityWeights {
    fn default() -> Self {
        Self {
            base: 100,
            ultra_fast_bonus: 30,
            ultra_fast_kw: 300,
            fast_bonus: 20,
            fast_kw: 150,
            available: 40,
            unknown: 10,
            occupied: -20,
            out_of_order: -50,
            proximity_horizon_km: 50,
            fast_food_bonus: 15,
            restrooms_bonus: 5,
            rating_multiplier: 10.0,
            crossing_penalty: -25,
            far_from_highway_penalty: -15,
            far_from_highway_m: 1000,
        }
    }
}

/// Configuration for filtering and scoring a candidate set.
#[derive(Debug, Clone, PartialEq)]
pub struct RankingConfig {
    /// Maximum number of results returned per request.
    pub max_results: usize,

    /// Fraction of the remaining range a charger may be away (20% reserve).
    pub safety_buffer: f64,

    /// Assumed average speed for time-to-reach.
    pub average_speed_kmh: f64,

    /// Real-world consumption multiplier applied to distance when
    /// estimating range left on arrival.
    pub consumption_buffer: f64,

    pub weights: PriorityWeights,
}

impl RankingConfig {
    pub fn with_max_results(mut self, n: usize) -> Self {
        self.max_results = n;
        self
    }

    pub fn with_average_speed(mut self, kmh: f64) -> Self {
        self.average_speed_kmh = kmh;
        self
    }

    pub fn with_safety_buffer(mut self, buffer: f64) -> Self {
        self.safety_buffer = buffer;
        self
    }

    pub fn with_weights(mut self, weights: PriorityWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Time to cover `distance_km` at the configured average speed.
    pub fn travel_time(&self, distance_km: f64) -> Duration {
        let secs = distance_km / self.average_speed_kmh * 3600.0;
        Duration::try_from_secs_f64(secs).unwrap_or(Duration::MAX)
    }
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            max_results: 20,
            safety_buffer: 0.8,
            average_speed_kmh: 100.0,
            consumption_buffer: 1.2,
            weights: PriorityWeights::default(),
        }
    }
}
