//! Great-circle geometry and corridor bounds checks.
//!
//! All distances are straight-line over the sphere; road distance is not
//! modelled.

use crate::domain::Coordinate;

/// Mean Earth radius in kilometres.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Axis-aligned latitude/longitude box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteBounds {
    pub min_latitude: f64,
    pub max_latitude: f64,
    pub min_longitude: f64,
    pub max_longitude: f64,
}

impl RouteBounds {
    /// Box around the Rotterdam ↔ Santa Pola corridor.
    pub const CORRIDOR: RouteBounds = RouteBounds {
        min_latitude: 38.0,
        max_latitude: 53.0,
        min_longitude: -1.0,
        max_longitude: 5.0,
    };

    pub fn contains(&self, c: &Coordinate) -> bool {
        is_valid_coordinate(c)
            && (self.min_latitude..=self.max_latitude).contains(&c.latitude)
            && (self.min_longitude..=self.max_longitude).contains(&c.longitude)
    }
}

/// Great-circle (haversine) distance in kilometres.
///
/// Returns `f64::INFINITY` if either coordinate is invalid, so threshold
/// comparisons downstream reject it.
pub fn distance_km(a: &Coordinate, b: &Coordinate) -> f64 {
    if !a.is_valid() || !b.is_valid() {
        return f64::INFINITY;
    }

    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let delta_lat = (b.latitude - a.latitude).to_radians();
    let delta_lon = (b.longitude - a.longitude).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lon / 2.0).sin().powi(2);
    // Rounding can push h marginally above 1 for antipodal points.
    let c = 2.0 * h.sqrt().min(1.0).asin();

    EARTH_RADIUS_KM * c
}

/// Finite and inside the legal latitude/longitude ranges.
pub fn is_valid_coordinate(c: &Coordinate) -> bool {
    c.is_valid()
}

/// Valid and inside the corridor box. Positions outside it are not served.
pub fn is_within_route_bounds(c: &Coordinate) -> bool {
    RouteBounds::CORRIDOR.contains(c)
}

/// Motorway segment of the corridor a point falls on, by latitude band.
pub fn highway_segment(c: &Coordinate) -> &'static str {
    if !c.is_valid() {
        return "Unknown highway segment";
    }
    match c.latitude {
        lat if lat >= 51.0 => "A2/A4 (Netherlands)",
        lat if lat >= 50.0 => "A1/A26 (Belgium/Northern France)",
        lat if lat >= 48.0 => "A4/A6 (Central France)",
        lat if lat >= 45.0 => "A7 (Southern France)",
        lat if lat >= 42.0 => "AP-7 (Northern Spain)",
        lat if lat >= 38.0 => "AP-7 (Eastern Spain)",
        _ => "Unknown highway segment",
    }
}

/// Motorway name by latitude band, as shown on a charger card.
pub fn highway_name(latitude: f64) -> &'static str {
    match latitude {
        lat if lat >= 51.0 => "A4/A2 (Netherlands)",
        lat if lat >= 49.5 => "A1/A26 (Belgium)",
        lat if lat >= 42.5 => "A6/A7 (France)",
        _ => "AP-7 (Spain)",
    }
}

pub fn country_name(latitude: f64) -> &'static str {
    match latitude {
        lat if lat >= 51.0 => "Netherlands",
        lat if lat >= 49.5 => "Belgium",
        lat if lat >= 42.5 => "France",
        _ => "Spain",
    }
}

/// Largest city near a latitude on the corridor.
pub fn nearest_city(latitude: f64) -> &'static str {
    match latitude {
        lat if lat >= 51.5 => "Rotterdam",
        lat if lat >= 51.0 => "Eindhoven",
        lat if lat >= 50.5 => "Brussels",
        lat if lat >= 49.0 => "Rouen",
        lat if lat >= 48.0 => "Paris",
        lat if lat >= 45.0 => "Lyon",
        lat if lat >= 43.0 => "Toulouse",
        lat if lat >= 41.0 => "Marseille",
        lat if lat >= 39.0 => "Valencia",
        _ => "Santa Pola",
    }
}
