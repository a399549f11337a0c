//! Synthetic chargers for when real data is unavailable.
//!
//! Keeps the driver looking at something plausible while the directory is
//! down, rate-limited or empty. Two shapes are produced:
//!
//! - [`SyntheticGenerator::generate`]: fast DC sites within 0.1° of the
//!   resolved position, ahead of the driver and reachable from their
//!   carriageway, so ranking keeps them even on the smallest range bucket.
//! - [`SyntheticGenerator::along_route`]: one site per known corridor
//!   waypoint still ahead, under a randomly picked network operator.

use std::sync::{Mutex, PoisonError};

use chrono::Utc;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::corridor::{Corridor, Waypoint};
use crate::domain::{
    Amenities, Availability, Charger, ChargerId, ChargerLocation, ConnectorType, Coordinate,
    HighwayAccess, HighwayDirection, OperatorInfo, Pricing, TravelDirection,
};
use crate::geo::{country_name, highway_name, nearest_city};

/// Maximum offset from the center in either axis, in degrees.
const MAX_OFFSET_DEG: f64 = 0.1;

const POWER_LEVELS_KW: [u32; 4] = [150, 175, 300, 350];

const AVAILABILITIES: [Availability; 3] = [
    Availability::Available,
    Availability::Occupied,
    Availability::Unknown,
];

const RESTAURANTS: [&str; 2] = ["McDonald's", "Shell Select"];

const WAYPOINT_OPERATORS: [&str; 5] = ["Ionity", "Fastned", "Tesla", "ChargePoint", "Electromaps"];

/// Seedable generator of synthetic chargers.
///
/// Shared across requests; the RNG sits behind a mutex that is never held
/// across an await.
pub struct SyntheticGenerator {
    rng: Mutex<ChaCha8Rng>,
}

impl SyntheticGenerator {
    /// Generator with a fixed seed: identical call sequences produce
    /// identical chargers.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(ChaCha8Rng::seed_from_u64(seed)),
        }
    }

    /// Generator seeded from the OS.
    pub fn from_entropy() -> Self {
        Self {
            rng: Mutex::new(ChaCha8Rng::from_entropy()),
        }
    }

    /// `count` chargers within 0.1° of `near`, on the side of it a driver
    /// heading `direction` has yet to reach.
    pub fn generate(
        &self,
        near: Coordinate,
        direction: TravelDirection,
        count: usize,
    ) -> Vec<Charger> {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        (0..count)
            .map(|i| synthetic_charger(&mut *rng, near, direction, i))
            .collect()
    }

    /// One charger at each waypoint of `corridor` still ahead of a driver
    /// at `position`, in driving order.
    pub fn along_route(
        &self,
        corridor: &Corridor,
        position: Coordinate,
        direction: TravelDirection,
    ) -> Vec<Charger> {
        let waypoints = corridor.waypoints_ahead(position, direction);
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        waypoints
            .into_iter()
            .map(|w| waypoint_charger(&mut *rng, w))
            .collect()
    }
}

impl Default for SyntheticGenerator {
    fn default() -> Self {
        Self::from_entropy()
    }
}

fn synthetic_charger<R: Rng + ?Sized>(
    rng: &mut R,
    near: Coordinate,
    direction: TravelDirection,
    index: usize,
) -> Charger {
    // Southbound drivers are heading to lower latitudes.
    let ahead = match direction {
        TravelDirection::RotterdamToSantaPola => -1.0,
        TravelDirection::SantaPolaToRotterdam => 1.0,
    };
    let coordinate = near.offset(
        ahead * rng.gen_range(0.0..=MAX_OFFSET_DEG),
        rng.gen_range(-MAX_OFFSET_DEG..=MAX_OFFSET_DEG),
    );
    let declared = [HighwayDirection::Both, HighwayDirection::from(direction)];
    let number = index + 1;

    Charger {
        id: ChargerId::synthetic(rng.next_u64()),
        name: format!("FastCharge Station {number}"),
        location: ChargerLocation {
            coordinate,
            address: format!("Highway Service Area {number}"),
            city: nearest_city(coordinate.latitude).to_string(),
            country: country_name(coordinate.latitude).to_string(),
            postal_code: "00000".to_string(),
        },
        power_kw: *POWER_LEVELS_KW.choose(rng).unwrap_or(&150),
        connectors: vec![ConnectorType::Ccs2],
        availability: *AVAILABILITIES.choose(rng).unwrap_or(&Availability::Unknown),
        amenities: service_area_amenities(rng),
        highway_access: HighwayAccess {
            highway_name: highway_name(coordinate.latitude).to_string(),
            direction: *declared.choose(rng).unwrap_or(&HighwayDirection::Both),
            exit_number: Some(rng.gen_range(1..=100u32).to_string()),
            access_instructions: "Service area directly accessible from highway".to_string(),
            distance_from_highway_m: rng.gen_range(100..=500),
            requires_crossing: false,
        },
        operator: OperatorInfo {
            name: "Shell Recharge".to_string(),
            network: "Shell".to_string(),
            support_phone: Some("+31-800-123456".to_string()),
            app_name: Some("Shell Recharge".to_string()),
        },
        pricing: Some(Pricing {
            price_per_kwh: Some((rng.gen_range(0.35..=0.79f64) * 100.0).round() / 100.0),
            price_per_minute: None,
            connection_fee: None,
            currency: "EUR".to_string(),
        }),
        user_rating: Some(rng.gen_range(3.0..=5.0)),
        last_updated: Utc::now(),
    }
}

fn waypoint_charger<R: Rng + ?Sized>(rng: &mut R, waypoint: &Waypoint) -> Charger {
    let operator = *WAYPOINT_OPERATORS.choose(rng).unwrap_or(&"Ionity");
    let coordinate = waypoint.coordinate;

    Charger {
        id: ChargerId::synthetic(rng.next_u64()),
        name: format!("{operator} {}", waypoint.name),
        location: ChargerLocation {
            coordinate,
            address: "Highway Service Area".to_string(),
            city: waypoint.name.clone(),
            country: country_name(coordinate.latitude).to_string(),
            postal_code: "00000".to_string(),
        },
        power_kw: *POWER_LEVELS_KW.choose(rng).unwrap_or(&150),
        connectors: vec![ConnectorType::Ccs2],
        availability: *AVAILABILITIES.choose(rng).unwrap_or(&Availability::Available),
        amenities: service_area_amenities(rng),
        highway_access: HighwayAccess {
            highway_name: highway_name(coordinate.latitude).to_string(),
            direction: HighwayDirection::Both,
            exit_number: Some(rng.gen_range(1..=100u32).to_string()),
            access_instructions: "Service area directly accessible from highway".to_string(),
            distance_from_highway_m: rng.gen_range(100..=500),
            requires_crossing: false,
        },
        operator: OperatorInfo {
            name: operator.to_string(),
            network: operator.to_string(),
            support_phone: Some("+33123456789".to_string()),
            app_name: Some(format!("{operator} App")),
        },
        pricing: Some(Pricing {
            price_per_kwh: Some((rng.gen_range(0.35..=0.79f64) * 100.0).round() / 100.0),
            price_per_minute: None,
            connection_fee: rng
                .gen_bool(0.5)
                .then(|| (rng.gen_range(0.5..=2.0f64) * 100.0).round() / 100.0),
            currency: "EUR".to_string(),
        }),
        user_rating: Some(rng.gen_range(3.5..=4.8)),
        last_updated: Utc::now(),
    }
}

/// Restrooms and parking always; the rest is a coin toss.
fn service_area_amenities<R: Rng + ?Sized>(rng: &mut R) -> Amenities {
    let fast_food_restaurants = if rng.gen_bool(0.5) {
        RESTAURANTS
            .choose(rng)
            .map(|r| vec![(*r).to_string()])
            .unwrap_or_default()
    } else {
        Vec::new()
    };

    Amenities {
        has_fast_food: rng.gen_bool(0.5),
        fast_food_restaurants,
        has_restrooms: true,
        has_wifi: rng.gen_bool(0.5),
        has_shopping: rng.gen_bool(0.5),
        has_parking: true,
        is_accessible: rng.gen_bool(0.5),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::geo::distance_km;
    use crate::planner::passes;

    const SOUTH: TravelDirection = TravelDirection::RotterdamToSantaPola;

    fn center() -> Coordinate {
        Coordinate::new(41.1189, 1.2445)
    }

    #[test]
    fn generates_requested_count_near_center() {
        let generator = SyntheticGenerator::seeded(7);
        let chargers = generator.generate(center(), SOUTH, 5);

        assert_eq!(chargers.len(), 5);
        for (i, c) in chargers.iter().enumerate() {
            let at = c.coordinate();
            assert!((at.latitude - center().latitude).abs() <= MAX_OFFSET_DEG + 1e-12);
            assert!((at.longitude - center().longitude).abs() <= MAX_OFFSET_DEG + 1e-12);
            assert_eq!(c.name, format!("FastCharge Station {}", i + 1));
        }
    }

    #[test]
    fn fields_stay_in_their_ranges() {
        let generator = SyntheticGenerator::seeded(11);
        for c in generator.generate(center(), SOUTH, 200) {
            assert!(POWER_LEVELS_KW.contains(&c.power_kw));
            assert_ne!(c.availability, Availability::OutOfOrder);
            let rating = c.user_rating.unwrap();
            assert!((3.0..=5.0).contains(&rating));
            assert!((100..=500).contains(&c.highway_access.distance_from_highway_m));
            assert!(c.amenities.has_restrooms);
            assert!(!c.highway_access.requires_crossing);
            assert_eq!(c.connectors, vec![ConnectorType::Ccs2]);
        }
    }

    #[test]
    fn always_ahead_accessible_and_close() {
        let generator = SyntheticGenerator::seeded(5);
        for direction in TravelDirection::ALL {
            for near in [center(), Coordinate::new(51.9, 4.4), Coordinate::new(38.2, -0.5)] {
                for c in generator.generate(near, direction, 50) {
                    assert!(passes(&c, direction, &near), "{:?} from {near:?}", c.coordinate());
                    // Within reach of the smallest bucket (20 km * 0.8).
                    assert!(distance_km(&near, &c.coordinate()) <= 16.0);
                }
            }
        }
    }

    #[test]
    fn ids_are_unique() {
        let generator = SyntheticGenerator::seeded(3);
        let ids: HashSet<_> = generator
            .generate(center(), SOUTH, 100)
            .into_iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(ids.len(), 100);
    }

    #[test]
    fn same_seed_same_chargers() {
        let a = SyntheticGenerator::seeded(42).generate(center(), SOUTH, 5);
        let b = SyntheticGenerator::seeded(42).generate(center(), SOUTH, 5);

        let key = |c: &Charger| {
            (c.id.clone(), c.power_kw, c.availability, c.highway_access.direction)
        };
        assert_eq!(
            a.iter().map(key).collect::<Vec<_>>(),
            b.iter().map(key).collect::<Vec<_>>()
        );
    }

    #[test]
    fn zero_count_is_empty() {
        assert!(SyntheticGenerator::seeded(1).generate(center(), SOUTH, 0).is_empty());
    }

    #[test]
    fn waypoint_chargers_sit_on_the_stops_ahead() {
        let corridor = Corridor::default();
        let lyon = Coordinate::new(45.76, 4.83);
        let chargers = SyntheticGenerator::seeded(9).along_route(&corridor, lyon, SOUTH);

        let stops: Vec<_> = corridor
            .waypoints_ahead(lyon, SOUTH)
            .into_iter()
            .map(|w| w.coordinate)
            .collect();
        assert_eq!(chargers.iter().map(|c| c.coordinate()).collect::<Vec<_>>(), stops);

        for c in &chargers {
            assert!(WAYPOINT_OPERATORS.contains(&c.operator.name.as_str()));
            assert_eq!(c.name, format!("{} {}", c.operator.name, c.location.city));
            assert_eq!(c.operator.app_name, Some(format!("{} App", c.operator.name)));
            assert_eq!(c.highway_access.direction, HighwayDirection::Both);
            let rating = c.user_rating.unwrap();
            assert!((3.5..=4.8).contains(&rating));
            if let Some(fee) = c.pricing.as_ref().and_then(|p| p.connection_fee) {
                assert!((0.5..=2.0).contains(&fee));
            }
        }
        assert_eq!(chargers[0].location.city, "Lyon");
    }

    #[test]
    fn no_waypoints_ahead_at_the_end_of_the_road() {
        let corridor = Corridor::default();
        // North of Rotterdam heading north.
        let beyond = Coordinate::new(53.5, 4.5);
        let north = TravelDirection::SantaPolaToRotterdam;

        assert!(SyntheticGenerator::seeded(2).along_route(&corridor, beyond, north).is_empty());
    }
}
