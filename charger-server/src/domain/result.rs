//! Per-request ranking output.

use std::sync::Arc;
use std::time::Duration;

use super::Charger;

/// Arrival range below which a result is flagged as urgent.
const URGENT_ARRIVAL_RANGE_KM: u32 = 20;

/// A scored charger for one request.
///
/// Derived and ephemeral: recomputed on every request and never stored.
/// Results that reach the caller have always passed the reachability
/// threshold, so `is_reachable` is `true` for every element of a ranked list.
#[derive(Debug, Clone)]
pub struct ChargerResult {
    pub charger: Arc<Charger>,
    /// Great-circle distance from the resolved position.
    pub distance_km: f64,
    pub time_to_reach: Duration,
    pub is_reachable: bool,
    /// Range left on arrival, after the consumption buffer.
    pub arrival_range_km: u32,
    /// Higher is better.
    pub priority: u32,
}

impl ChargerResult {
    pub fn is_urgent(&self) -> bool {
        self.arrival_range_km < URGENT_ARRIVAL_RANGE_KM
    }

    /// "850 m" below one kilometre, "12.3 km" otherwise.
    pub fn formatted_distance(&self) -> String {
        format_distance(self.distance_km)
    }

    /// "1h 5m" or "42m".
    pub fn formatted_time(&self) -> String {
        format_duration(self.time_to_reach)
    }
}

pub fn format_distance(km: f64) -> String {
    if km < 1.0 {
        format!("{:.0} m", km * 1000.0)
    } else {
        format!("{km:.1} km")
    }
}

pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    let hours = secs / 3600;
    let minutes = (secs % 3600) / 60;
    if hours > 0 {
        format!("{hours}h {minutes}m")
    } else {
        format!("{minutes}m")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_formatting() {
        assert_eq!(format_distance(0.85), "850 m");
        assert_eq!(format_distance(1.0), "1.0 km");
        assert_eq!(format_distance(12.34), "12.3 km");
    }

    #[test]
    fn duration_formatting() {
        assert_eq!(format_duration(Duration::from_secs(42 * 60 + 10)), "42m");
        assert_eq!(format_duration(Duration::from_secs(3600 + 5 * 60)), "1h 5m");
        assert_eq!(format_duration(Duration::ZERO), "0m");
    }
}
