//! Charger value types.

use std::fmt;

use chrono::{DateTime, Utc};

use super::{Coordinate, HighwayDirection};

/// Error returned when a charger id is empty.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid charger id: must not be empty")]
pub struct InvalidChargerId;

/// Stable unique identifier of a charger.
///
/// Ids come from the directory provider (its UUID or numeric id) or from the
/// synthetic generator. They are opaque; the only invariant is that they are
/// non-empty after trimming.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChargerId(String);

impl ChargerId {
    pub fn parse(s: &str) -> Result<Self, InvalidChargerId> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(InvalidChargerId);
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Id for a generated charger. Never blank.
    pub(crate) fn synthetic(n: u64) -> Self {
        Self(format!("synthetic-{n:016x}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ChargerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ChargerId({})", self.0)
    }
}

impl fmt::Display for ChargerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Where a charger is.
#[derive(Debug, Clone, PartialEq)]
pub struct ChargerLocation {
    pub coordinate: Coordinate,
    pub address: String,
    pub city: String,
    pub country: String,
    pub postal_code: String,
}

/// Plug standards a charger offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ConnectorType {
    Ccs2,
    Chademo,
    Type2,
    Tesla,
}

impl ConnectorType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConnectorType::Ccs2 => "CCS2",
            ConnectorType::Chademo => "CHAdeMO",
            ConnectorType::Type2 => "Type2",
            ConnectorType::Tesla => "Tesla",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ConnectorType::Ccs2 => "CCS2 (Combined Charging System)",
            ConnectorType::Chademo => "CHAdeMO",
            ConnectorType::Type2 => "Type 2 (AC)",
            ConnectorType::Tesla => "Tesla Supercharger",
        }
    }
}

/// Live availability status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Availability {
    Available,
    Occupied,
    OutOfOrder,
    Unknown,
}

impl Availability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Availability::Available => "available",
            Availability::Occupied => "occupied",
            Availability::OutOfOrder => "out_of_order",
            Availability::Unknown => "unknown",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Availability::Available => "Available",
            Availability::Occupied => "Occupied",
            Availability::OutOfOrder => "Out of Order",
            Availability::Unknown => "Status Unknown",
        }
    }
}

/// Facilities at the charging site.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Amenities {
    pub has_fast_food: bool,
    pub fast_food_restaurants: Vec<String>,
    pub has_restrooms: bool,
    pub has_wifi: bool,
    pub has_shopping: bool,
    pub has_parking: bool,
    pub is_accessible: bool,
}

/// How the charger connects to the motorway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighwayAccess {
    pub highway_name: String,
    pub direction: HighwayDirection,
    pub exit_number: Option<String>,
    pub access_instructions: String,
    /// Metres between the carriageway and the charger.
    pub distance_from_highway_m: u32,
    /// Reaching the site means crossing to the other carriageway.
    pub requires_crossing: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperatorInfo {
    pub name: String,
    pub network: String,
    pub support_phone: Option<String>,
    pub app_name: Option<String>,
}

/// Tariff information, as published. Never used for scoring.
#[derive(Debug, Clone, PartialEq)]
pub struct Pricing {
    pub price_per_kwh: Option<f64>,
    pub price_per_minute: Option<f64>,
    pub connection_fee: Option<f64>,
    pub currency: String,
}

/// A fast charger along the corridor.
///
/// Immutable once built; produced either by the directory adapter or by the
/// synthetic generator.
#[derive(Debug, Clone, PartialEq)]
pub struct Charger {
    pub id: ChargerId,
    pub name: String,
    pub location: ChargerLocation,
    /// Highest rated output in kW.
    pub power_kw: u32,
    /// Deduplicated, sorted.
    pub connectors: Vec<ConnectorType>,
    pub availability: Availability,
    pub amenities: Amenities,
    pub highway_access: HighwayAccess,
    pub operator: OperatorInfo,
    pub pricing: Option<Pricing>,
    /// Average user rating on a 0-5 scale.
    pub user_rating: Option<f64>,
    pub last_updated: DateTime<Utc>,
}

impl Charger {
    pub fn coordinate(&self) -> Coordinate {
        self.location.coordinate
    }
}
