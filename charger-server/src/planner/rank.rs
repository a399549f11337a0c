//! Candidate ranking and list utilities.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use crate::domain::{
    Availability, Charger, ChargerId, ChargerResult, Coordinate, RemainingRange, TravelDirection,
};
use crate::geo::highway_segment;

use super::config::RankingConfig;
use super::filter;
use super::score;

/// Rank a candidate set for one request.
///
/// Blacklisted ids go first, then chargers that are behind the driver or on
/// the wrong carriageway, then anything out of safe reach. Survivors are
/// ordered by priority (highest first), then distance (nearest first), then
/// id, and truncated to `config.max_results`. An empty list is a valid answer.
pub fn rank(
    candidates: &[Arc<Charger>],
    direction: TravelDirection,
    range: RemainingRange,
    position: &Coordinate,
    blacklist: &BTreeSet<ChargerId>,
    config: &RankingConfig,
) -> Vec<ChargerResult> {
    let mut results: Vec<ChargerResult> = candidates
        .iter()
        .filter(|c| !blacklist.contains(&c.id))
        .filter(|c| filter::passes(c, direction, position))
        .filter_map(|c| score::score(position, c, range, config))
        .collect();

    results.sort_by(compare_results);
    results.truncate(config.max_results);
    results
}

/// Total order used by [`rank`].
fn compare_results(a: &ChargerResult, b: &ChargerResult) -> Ordering {
    b.priority
        .cmp(&a.priority)
        .then_with(|| a.distance_km.total_cmp(&b.distance_km))
        .then_with(|| a.charger.id.cmp(&b.charger.id))
}

/// Keep available chargers, plus unknown ones if `include_unknown`.
pub fn filter_by_availability(
    results: &[ChargerResult],
    include_unknown: bool,
) -> Vec<ChargerResult> {
    results
        .iter()
        .filter(|r| match r.charger.availability {
            Availability::Available => true,
            Availability::Unknown => include_unknown,
            Availability::Occupied | Availability::OutOfOrder => false,
        })
        .cloned()
        .collect()
}

pub fn filter_by_min_power(results: &[ChargerResult], min_kw: u32) -> Vec<ChargerResult> {
    results
        .iter()
        .filter(|r| r.charger.power_kw >= min_kw)
        .cloned()
        .collect()
}

/// No-op unless `required`.
pub fn filter_by_fast_food(results: &[ChargerResult], required: bool) -> Vec<ChargerResult> {
    if !required {
        return results.to_vec();
    }
    results
        .iter()
        .filter(|r| r.charger.amenities.has_fast_food)
        .cloned()
        .collect()
}

/// Group results by the motorway segment they sit on. Order within a group
/// is the input order.
pub fn group_by_highway_segment(
    results: &[ChargerResult],
) -> BTreeMap<&'static str, Vec<ChargerResult>> {
    let mut groups: BTreeMap<&'static str, Vec<ChargerResult>> = BTreeMap::new();
    for result in results {
        groups
            .entry(highway_segment(&result.charger.coordinate()))
            .or_default()
            .push(result.clone());
    }
    groups
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::planner::test_support::charger_at;
    use proptest::prelude::*;

    fn charger_strategy() -> impl Strategy<Value = Arc<Charger>> {
        (
            0u32..1000,
            40.0f64..48.0,
            0.0f64..4.0,
            prop::sample::select(vec![50u32, 150, 175, 300, 350]),
            prop::sample::select(vec![
                Availability::Available,
                Availability::Occupied,
                Availability::OutOfOrder,
                Availability::Unknown,
            ]),
            prop::option::of(0.0f64..5.0),
        )
            .prop_map(|(id, lat, lon, kw, availability, rating)| {
                let mut c = charger_at(&format!("p{id}"), lat, lon);
                c.power_kw = kw;
                c.availability = availability;
                c.user_rating = rating;
                Arc::new(c)
            })
    }

    fn candidates_strategy() -> impl Strategy<Value = Vec<Arc<Charger>>> {
        prop::collection::vec(charger_strategy(), 0..40)
    }

    fn range_strategy() -> impl Strategy<Value = RemainingRange> {
        prop::sample::select(RemainingRange::ALL.to_vec())
    }

    fn direction_strategy() -> impl Strategy<Value = TravelDirection> {
        prop::sample::select(TravelDirection::ALL.to_vec())
    }

    proptest! {
        #[test]
        fn rank_is_sorted(
            candidates in candidates_strategy(),
            range in range_strategy(),
            direction in direction_strategy(),
        ) {
            let position = Coordinate::new(44.0, 2.0);
            let ranked = rank(
                &candidates,
                direction,
                range,
                &position,
                &BTreeSet::new(),
                &RankingConfig::default(),
            );

            for window in ranked.windows(2) {
                prop_assert!(
                    compare_results(&window[0], &window[1]) != Ordering::Greater,
                    "Not sorted: {:?} before {:?}",
                    (window[0].priority, window[0].distance_km),
                    (window[1].priority, window[1].distance_km)
                );
            }
        }

        #[test]
        fn rank_output_is_bounded_and_reachable(
            candidates in candidates_strategy(),
            range in range_strategy(),
            direction in direction_strategy(),
        ) {
            let config = RankingConfig::default().with_max_results(10);
            let position = Coordinate::new(44.0, 2.0);
            let ranked = rank(&candidates, direction, range, &position, &BTreeSet::new(), &config);

            prop_assert!(ranked.len() <= 10);
            let limit = score::max_reachable_km(range, &config);
            for r in &ranked {
                prop_assert!(r.is_reachable);
                prop_assert!(r.distance_km <= limit);
                prop_assert!(filter::passes(&r.charger, direction, &position));
            }
        }
    }
}
