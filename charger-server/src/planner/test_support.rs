//! Charger builders shared by the planner and finder tests.

use chrono::{TimeZone, Utc};

use crate::domain::{
    Amenities, Availability, Charger, ChargerId, ChargerLocation, ConnectorType, Coordinate,
    HighwayAccess, HighwayDirection, OperatorInfo,
};

/// A plain charger with no bonuses or penalties beyond its position:
/// 50 kW, available, no amenities, reachable from both carriageways.
pub(crate) fn charger_at(id: &str, lat: f64, lon: f64) -> Charger {
    Charger {
        id: ChargerId::parse(id).unwrap(),
        name: format!("Charger {id}"),
        location: ChargerLocation {
            coordinate: Coordinate::new(lat, lon),
            address: "Test Services".to_string(),
            city: "Testville".to_string(),
            country: "France".to_string(),
            postal_code: "00000".to_string(),
        },
        power_kw: 50,
        connectors: vec![ConnectorType::Ccs2],
        availability: Availability::Available,
        amenities: Amenities::default(),
        highway_access: HighwayAccess {
            highway_name: "A7".to_string(),
            direction: HighwayDirection::Both,
            exit_number: None,
            access_instructions: String::new(),
            distance_from_highway_m: 0,
            requires_crossing: false,
        },
        operator: OperatorInfo {
            name: "Test".to_string(),
            network: "Test".to_string(),
            support_phone: None,
            app_name: None,
        },
        pricing: None,
        user_rating: None,
        last_updated: Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap(),
    }
}

/// Point `km` kilometres due south of `from` (one degree ≈ 111.195 km).
pub(crate) fn south_of(from: Coordinate, km: f64) -> Coordinate {
    Coordinate::new(from.latitude - km / KM_PER_DEGREE_LAT, from.longitude)
}

pub(crate) fn north_of(from: Coordinate, km: f64) -> Coordinate {
    Coordinate::new(from.latitude + km / KM_PER_DEGREE_LAT, from.longitude)
}

/// Kilometres per degree of latitude on a 6371 km sphere.
pub(crate) const KM_PER_DEGREE_LAT: f64 = 6371.0 * std::f64::consts::PI / 180.0;
