//! Direction and accessibility filtering.

use crate::domain::{Charger, Coordinate, HighwayDirection, TravelDirection};

/// Whether `charger` lies ahead of `from` for a driver heading `direction`.
///
/// The corridor runs roughly north-south, so latitude is the progress axis:
/// southbound drivers look at lower-or-equal latitudes, northbound drivers at
/// higher-or-equal. Equal latitude counts as ahead in both directions.
/// Invalid coordinates on either side are never ahead.
pub fn is_ahead(charger: &Coordinate, direction: TravelDirection, from: &Coordinate) -> bool {
    if !charger.is_valid() || !from.is_valid() {
        return false;
    }
    match direction {
        TravelDirection::RotterdamToSantaPola => charger.latitude <= from.latitude,
        TravelDirection::SantaPolaToRotterdam => charger.latitude >= from.latitude,
    }
}

/// Whether a charger declared for `declared` can be reached while travelling
/// `travel`.
pub fn is_accessible(declared: HighwayDirection, travel: TravelDirection) -> bool {
    declared.is_compatible(travel)
}

/// Both predicates; a charger must pass this to stay a candidate.
pub fn passes(charger: &Charger, direction: TravelDirection, from: &Coordinate) -> bool {
    is_accessible(charger.highway_access.direction, direction)
        && is_ahead(&charger.coordinate(), direction, from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::test_support::charger_at;

    const SOUTH: TravelDirection = TravelDirection::RotterdamToSantaPola;
    const NORTH: TravelDirection = TravelDirection::SantaPolaToRotterdam;

    fn at(lat: f64) -> Coordinate {
        Coordinate::new(lat, 2.0)
    }

    #[test]
    fn southbound_looks_south() {
        assert!(is_ahead(&at(45.0), SOUTH, &at(46.0)));
        assert!(!is_ahead(&at(47.0), SOUTH, &at(46.0)));
    }

    #[test]
    fn northbound_looks_north() {
        assert!(is_ahead(&at(47.0), NORTH, &at(46.0)));
        assert!(!is_ahead(&at(45.0), NORTH, &at(46.0)));
    }

    #[test]
    fn equal_latitude_is_ahead_both_ways() {
        assert!(is_ahead(&at(46.0), SOUTH, &at(46.0)));
        assert!(is_ahead(&at(46.0), NORTH, &at(46.0)));
    }

    #[test]
    fn invalid_is_never_ahead() {
        let bad = Coordinate::new(f64::NAN, 2.0);
        for direction in TravelDirection::ALL {
            assert!(!is_ahead(&bad, direction, &at(46.0)));
            assert!(!is_ahead(&at(46.0), direction, &bad));
            assert!(!is_ahead(&Coordinate::new(-100.0, 0.0), direction, &at(46.0)));
        }
    }

    #[test]
    fn accessibility() {
        assert!(is_accessible(HighwayDirection::Both, SOUTH));
        assert!(is_accessible(HighwayDirection::Both, NORTH));
        assert!(is_accessible(HighwayDirection::Forward, SOUTH));
        assert!(!is_accessible(HighwayDirection::Forward, NORTH));
        assert!(is_accessible(HighwayDirection::Reverse, NORTH));
        assert!(!is_accessible(HighwayDirection::Reverse, SOUTH));
    }

    #[test]
    fn passes_requires_both() {
        let from = at(46.0);

        let mut ahead_wrong_side = charger_at("a", 45.0, 2.0);
        ahead_wrong_side.highway_access.direction = HighwayDirection::Reverse;
        assert!(!passes(&ahead_wrong_side, SOUTH, &from));

        let behind_right_side = charger_at("b", 47.0, 2.0);
        assert!(!passes(&behind_right_side, SOUTH, &from));

        let good = charger_at("c", 45.0, 2.0);
        assert!(passes(&good, SOUTH, &from));
    }
}
