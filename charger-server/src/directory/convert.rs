//! Conversion from OpenChargeMap DTOs to domain chargers.
//!
//! The directory knows nothing about carriageways, amenities or ratings, so
//! those fields get conservative defaults: reachable from both directions,
//! right next to the motorway, no bonuses.

use chrono::{DateTime, Utc};

use crate::domain::{
    Amenities, Availability, Charger, ChargerId, ChargerLocation, ConnectorType, Coordinate,
    HighwayAccess, HighwayDirection, OperatorInfo,
};

use crate::geo::highway_name;

use super::types::{Connection, PoiRecord};

/// Rated power assumed when no connection reports one. The search asks for
/// `minpowerkw=50`, so anything returned is at least this fast.
const DEFAULT_POWER_KW: u32 = 50;

/// Convert one POI, stamping missing update times with the current time.
///
/// Returns `None` when the record has no usable coordinate.
pub fn convert_poi(record: &PoiRecord) -> Option<Charger> {
    convert_poi_at(record, Utc::now())
}

/// Convert one POI, using `now` when the record carries no parseable
/// status-update timestamp.
pub fn convert_poi_at(record: &PoiRecord, now: DateTime<Utc>) -> Option<Charger> {
    let address = record.address_info.as_ref()?;
    let coordinate = Coordinate::parse(address.latitude?, address.longitude?).ok()?;

    let connections = record.connections.as_deref().unwrap_or(&[]);

    let street = [address.address_line1.as_deref(), address.address_line2.as_deref()]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(", ");

    let comments = record.general_comments.as_deref();

    Some(Charger {
        id: charger_id(record, &coordinate)?,
        name: non_empty(address.title.as_deref()).unwrap_or("Charging Station").to_string(),
        location: ChargerLocation {
            coordinate,
            address: street,
            city: non_empty(address.town.as_deref()).unwrap_or("Unknown").to_string(),
            country: address
                .country
                .as_ref()
                .and_then(|c| non_empty(c.title.as_deref()))
                .unwrap_or("Unknown")
                .to_string(),
            postal_code: address.postcode.clone().unwrap_or_default(),
        },
        power_kw: max_power_kw(connections),
        connectors: connector_types(connections),
        availability: availability(record.status_type.as_ref().and_then(|s| s.id)),
        amenities: Amenities {
            has_parking: true,
            is_accessible: comments.is_some_and(|c| c.to_lowercase().contains("accessible")),
            ..Amenities::default()
        },
        highway_access: HighwayAccess {
            highway_name: highway_name(coordinate.latitude).to_string(),
            direction: HighwayDirection::Both,
            exit_number: None,
            access_instructions: non_empty(comments)
                .unwrap_or("No specific instructions")
                .to_string(),
            distance_from_highway_m: 0,
            requires_crossing: false,
        },
        operator: OperatorInfo {
            name: record
                .operator_info
                .as_ref()
                .and_then(|o| non_empty(o.title.as_deref()))
                .unwrap_or("Unknown Operator")
                .to_string(),
            network: record
                .data_provider
                .as_ref()
                .and_then(|d| non_empty(d.title.as_deref()))
                .unwrap_or("Unknown Network")
                .to_string(),
            support_phone: record
                .operator_info
                .as_ref()
                .and_then(|o| o.phone_primary_contact.clone()),
            app_name: None,
        },
        pricing: None,
        user_rating: None,
        last_updated: record
            .date_last_status_update
            .as_deref()
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or(now),
    })
}

/// Convert a batch, skipping records without a usable location.
pub fn convert_records(records: &[PoiRecord]) -> Vec<Charger> {
    let now = Utc::now();
    let mut chargers = Vec::with_capacity(records.len());

    for record in records {
        match convert_poi_at(record, now) {
            Some(charger) => chargers.push(charger),
            None => {
                tracing::debug!(
                    id = ?record.id,
                    uuid = ?record.uuid,
                    "Skipping POI without a usable coordinate"
                );
            }
        }
    }

    chargers
}

/// Availability from the OpenChargeMap status type id.
pub fn availability(status_id: Option<i64>) -> Availability {
    match status_id {
        Some(50) => Availability::Available,
        Some(75) => Availability::Occupied,
        Some(100) | Some(150) => Availability::OutOfOrder,
        _ => Availability::Unknown,
    }
}

/// Connector from the OpenChargeMap connection type id. Unrecognised types
/// on a fast-charging search are overwhelmingly CCS2.
pub fn connector_type(type_id: i64) -> ConnectorType {
    match type_id {
        25 | 1036 => ConnectorType::Ccs2,
        2 => ConnectorType::Chademo,
        1 => ConnectorType::Type2,
        27 => ConnectorType::Tesla,
        _ => ConnectorType::Ccs2,
    }
}

fn connector_types(connections: &[Connection]) -> Vec<ConnectorType> {
    let mut types: Vec<ConnectorType> = connections
        .iter()
        .filter_map(|c| c.connection_type.as_ref()?.id)
        .map(connector_type)
        .collect();
    types.sort();
    types.dedup();

    if types.is_empty() {
        types.push(ConnectorType::Ccs2);
    }
    types
}

fn max_power_kw(connections: &[Connection]) -> u32 {
    connections
        .iter()
        .filter_map(|c| c.power_kw)
        .filter(|kw| kw.is_finite() && *kw > 0.0)
        .max_by(f64::total_cmp)
        .map(|kw| kw as u32)
        .unwrap_or(DEFAULT_POWER_KW)
}

/// Prefer the UUID, then the numeric id, then the position.
fn charger_id(record: &PoiRecord, coordinate: &Coordinate) -> Option<ChargerId> {
    let from_uuid = record.uuid.as_deref().and_then(|u| ChargerId::parse(u).ok());
    let from_id = || record.id.and_then(|id| ChargerId::parse(&format!("ocm-{id}")).ok());
    let from_position = || {
        let key = format!("poi-{:.5},{:.5}", coordinate.latitude, coordinate.longitude);
        ChargerId::parse(&key).ok()
    };

    from_uuid.or_else(from_id).or_else(from_position)
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|s| !s.is_empty())
}
