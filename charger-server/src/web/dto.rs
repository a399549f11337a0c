//! Data transfer objects for web requests and responses.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::domain::{Charger, ChargerId, ChargerResult, Coordinate, TravelDirection};
use crate::finder::FindOutcome;
use crate::planner::{
    filter_by_availability, filter_by_fast_food, filter_by_min_power, group_by_highway_segment,
};

/// Query for `GET /api/chargers`.
#[derive(Debug, Deserialize)]
pub struct ChargerQuery {
    /// `forward`/`reverse` or the long direction names
    pub direction: String,

    /// Remaining range in km: 20, 40, 60 or 80
    pub range: u32,

    /// Current latitude, given together with `lon`
    pub lat: Option<f64>,

    pub lon: Option<f64>,

    /// When set, keep only available chargers, plus unknown ones if true
    pub include_unknown: Option<bool>,

    pub min_power_kw: Option<u32>,

    /// Keep only sites with fast food
    #[serde(default)]
    pub fast_food: bool,

    /// Also return result ids grouped by motorway segment
    #[serde(default)]
    pub by_segment: bool,
}

impl ChargerQuery {
    /// Apply the optional list filters. Rank order is kept.
    pub fn narrow(&self, results: &[ChargerResult]) -> Vec<ChargerResult> {
        let mut kept = results.to_vec();
        if let Some(include_unknown) = self.include_unknown {
            kept = filter_by_availability(&kept, include_unknown);
        }
        if let Some(min_kw) = self.min_power_kw {
            kept = filter_by_min_power(&kept, min_kw);
        }
        filter_by_fast_food(&kept, self.fast_food)
    }
}

/// A latitude/longitude pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PositionResult {
    pub latitude: f64,
    pub longitude: f64,
}

impl From<Coordinate> for PositionResult {
    fn from(c: Coordinate) -> Self {
        Self {
            latitude: c.latitude,
            longitude: c.longitude,
        }
    }
}

/// Site facilities.
#[derive(Debug, Serialize)]
pub struct AmenitiesResult {
    pub fast_food: Vec<String>,
    pub restrooms: bool,
    pub wifi: bool,
    pub shopping: bool,
    pub parking: bool,
    pub accessible: bool,
}

/// Published tariff.
#[derive(Debug, Serialize)]
pub struct PricingResult {
    pub price_per_kwh: Option<f64>,
    pub price_per_minute: Option<f64>,
    pub connection_fee: Option<f64>,
    pub currency: String,
}

/// One ranked charger.
#[derive(Debug, Serialize)]
pub struct ChargerResultDto {
    pub id: String,
    pub name: String,
    pub address: String,
    pub city: String,
    pub country: String,
    pub position: PositionResult,

    pub power_kw: u32,
    pub connectors: Vec<&'static str>,

    /// `available`, `occupied`, `out_of_order` or `unknown`
    pub availability: &'static str,

    pub highway: String,
    pub exit_number: Option<String>,
    pub access_instructions: String,
    pub distance_from_highway_m: u32,

    pub operator: String,
    pub network: String,
    pub support_phone: Option<String>,
    pub amenities: AmenitiesResult,
    pub pricing: Option<PricingResult>,
    pub rating: Option<f64>,

    pub distance_km: f64,
    /// e.g. "850 m" or "12.3 km"
    pub formatted_distance: String,
    pub time_to_reach_mins: u64,
    /// e.g. "1h 5m"
    pub formatted_time: String,
    pub arrival_range_km: u32,
    /// Little range left on arrival
    pub is_urgent: bool,
    pub priority: u32,
}

impl ChargerResultDto {
    pub fn from_result(result: &ChargerResult) -> Self {
        let c: &Charger = &result.charger;
        Self {
            id: c.id.as_str().to_string(),
            name: c.name.clone(),
            address: c.location.address.clone(),
            city: c.location.city.clone(),
            country: c.location.country.clone(),
            position: c.coordinate().into(),
            power_kw: c.power_kw,
            connectors: c.connectors.iter().map(|t| t.as_str()).collect(),
            availability: c.availability.as_str(),
            highway: c.highway_access.highway_name.clone(),
            exit_number: c.highway_access.exit_number.clone(),
            access_instructions: c.highway_access.access_instructions.clone(),
            distance_from_highway_m: c.highway_access.distance_from_highway_m,
            operator: c.operator.name.clone(),
            network: c.operator.network.clone(),
            support_phone: c.operator.support_phone.clone(),
            amenities: AmenitiesResult {
                fast_food: c.amenities.fast_food_restaurants.clone(),
                restrooms: c.amenities.has_restrooms,
                wifi: c.amenities.has_wifi,
                shopping: c.amenities.has_shopping,
                parking: c.amenities.has_parking,
                accessible: c.amenities.is_accessible,
            },
            pricing: c.pricing.as_ref().map(|p| PricingResult {
                price_per_kwh: p.price_per_kwh,
                price_per_minute: p.price_per_minute,
                connection_fee: p.connection_fee,
                currency: p.currency.clone(),
            }),
            rating: c.user_rating,
            distance_km: result.distance_km,
            formatted_distance: result.formatted_distance(),
            time_to_reach_mins: result.time_to_reach.as_secs() / 60,
            formatted_time: result.formatted_time(),
            arrival_range_km: result.arrival_range_km,
            is_urgent: result.is_urgent(),
            priority: result.priority,
        }
    }
}

/// Response for `GET /api/chargers`.
#[derive(Debug, Serialize)]
pub struct FindChargersResponse {
    /// Best first
    pub results: Vec<ChargerResultDto>,

    /// Message to show the driver, if something degraded
    pub advisory: Option<String>,

    pub position: PositionResult,

    /// `supplied`, `device`, `estimated` or `fallback`
    pub position_source: &'static str,

    /// `live` or `synthetic`
    pub data_source: &'static str,

    pub direction: &'static str,
    pub range_km: u32,

    /// Result ids by motorway segment, when asked for
    pub segments: Option<BTreeMap<&'static str, Vec<String>>>,
}

impl FindChargersResponse {
    pub fn from_outcome(outcome: &FindOutcome, direction: TravelDirection, range_km: u32) -> Self {
        Self {
            results: outcome.results.iter().map(ChargerResultDto::from_result).collect(),
            advisory: outcome.advisory.clone(),
            position: outcome.position.into(),
            position_source: outcome.position_source.as_str(),
            data_source: outcome.data_source.as_str(),
            direction: direction.as_str(),
            range_km,
            segments: None,
        }
    }

    pub fn with_segments(mut self, results: &[ChargerResult]) -> Self {
        let grouped: BTreeMap<_, _> = group_by_highway_segment(results)
            .into_iter()
            .map(|(segment, group)| {
                let ids: Vec<String> =
                    group.iter().map(|r| r.charger.id.as_str().to_string()).collect();
                (segment, ids)
            })
            .collect();
        self.segments = Some(grouped);
        self
    }
}

/// Response for the blacklist endpoints.
#[derive(Debug, Serialize)]
pub struct BlacklistResponse {
    /// Sorted ids
    pub ids: Vec<String>,
}

impl BlacklistResponse {
    pub fn from_ids(ids: &BTreeSet<ChargerId>) -> Self {
        Self {
            ids: ids.iter().map(|id| id.as_str().to_string()).collect(),
        }
    }
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
