//! The fixed Rotterdam ↔ Santa Pola corridor and GPS-less position estimate.

use crate::domain::{Coordinate, RemainingRange, TravelDirection};

/// Usable range is assumed to be this many times the reported bucket when
/// guessing how far along the trip the driver is.
const RANGE_TO_TRIP_FACTOR: f64 = 4.0;

/// Latitude slack when deciding whether a waypoint is still ahead.
const WAYPOINT_SLACK_DEG: f64 = 1.0;

/// A known charging stop on the corridor.
#[derive(Debug, Clone, PartialEq)]
pub struct Waypoint {
    pub name: String,
    pub coordinate: Coordinate,
}

impl Waypoint {
    pub fn new(name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            name: name.into(),
            coordinate: Coordinate::new(latitude, longitude),
        }
    }
}

/// Charging stops from Rotterdam to Santa Pola, north to south.
fn default_waypoints() -> Vec<Waypoint> {
    vec![
        Waypoint::new("Rotterdam", 51.9225, 4.4792),
        Waypoint::new("Eindhoven", 51.4416, 5.4697),
        Waypoint::new("Brussels", 50.8467, 4.3525),
        Waypoint::new("Rouen", 49.4431, 1.0993),
        Waypoint::new("Paris", 48.8566, 2.3522),
        Waypoint::new("Lyon", 45.7640, 4.8357),
        Waypoint::new("Toulouse", 43.6047, 1.4442),
        Waypoint::new("Marseille", 43.2965, 5.3698),
        Waypoint::new("Zaragoza", 41.6488, -0.8891),
        Waypoint::new("Valencia", 39.4699, -0.3763),
        Waypoint::new("Santa Pola", 38.1929, -0.5519),
    ]
}

/// The corridor every request is reasoned against.
#[derive(Debug, Clone, PartialEq)]
pub struct Corridor {
    /// Northern endpoint (Rotterdam).
    pub north: Coordinate,
    /// Southern endpoint (Santa Pola).
    pub south: Coordinate,
    /// Driving distance between the endpoints.
    pub total_distance_km: f64,
    /// Used when no position can be obtained at all (near Tarragona).
    pub fallback_position: Coordinate,
    /// Known charging stops, north to south.
    pub waypoints: Vec<Waypoint>,
}

impl Default for Corridor {
    fn default() -> Self {
        Self {
            north: Coordinate::new(51.9225, 4.4792),
            south: Coordinate::new(38.1929, -0.5519),
            total_distance_km: 1600.0,
            fallback_position: Coordinate::new(41.1189, 1.2445),
            waypoints: default_waypoints(),
        }
    }
}

impl Corridor {
    /// Endpoint a trip in `direction` starts from.
    pub fn origin(&self, direction: TravelDirection) -> Coordinate {
        match direction {
            TravelDirection::RotterdamToSantaPola => self.north,
            TravelDirection::SantaPolaToRotterdam => self.south,
        }
    }

    pub fn destination(&self, direction: TravelDirection) -> Coordinate {
        self.origin(direction.reversed())
    }

    /// Waypoints a driver at `position` heading `direction` has not yet
    /// passed, in driving order. Stops up to one degree of latitude behind
    /// still count, so a stop being passed right now is kept.
    pub fn waypoints_ahead(
        &self,
        position: Coordinate,
        direction: TravelDirection,
    ) -> Vec<&Waypoint> {
        let mut ahead: Vec<&Waypoint> = self
            .waypoints
            .iter()
            .filter(|w| match direction {
                TravelDirection::RotterdamToSantaPola => {
                    w.coordinate.latitude <= position.latitude + WAYPOINT_SLACK_DEG
                }
                TravelDirection::SantaPolaToRotterdam => {
                    w.coordinate.latitude >= position.latitude - WAYPOINT_SLACK_DEG
                }
            })
            .collect();
        if direction == TravelDirection::SantaPolaToRotterdam {
            ahead.reverse();
        }
        ahead
    }

    /// Guess where the driver is when there is no GPS fix.
    ///
    /// Assumes the whole trip is about four range buckets long, so a driver
    /// with 80 km left is 80% of the way along. This is a demo-grade
    /// heuristic, not telemetry. Latitude and longitude are interpolated
    /// independently between the direction's endpoints. Falls back to the
    /// origin endpoint if the result is not a valid coordinate.
    pub fn estimate_position(
        &self,
        direction: TravelDirection,
        range: RemainingRange,
    ) -> Coordinate {
        let origin = self.origin(direction);
        let destination = self.destination(direction);

        let progress = self.progress_ratio(range);
        let estimate = Coordinate::new(
            origin.latitude + (destination.latitude - origin.latitude) * progress,
            origin.longitude + (destination.longitude - origin.longitude) * progress,
        );

        if estimate.is_valid() {
            estimate
        } else {
            origin
        }
    }

    /// Fraction of the trip assumed already driven, clamped to [0, 1].
    fn progress_ratio(&self, range: RemainingRange) -> f64 {
        let ratio = 1.0 - (range.km_f64() * RANGE_TO_TRIP_FACTOR) / self.total_distance_km;
        if ratio.is_nan() {
            return 0.0;
        }
        ratio.clamp(0.0, 1.0)
    }
}
