//! Charger directory: where candidate chargers come from.
//!
//! The live source is the OpenChargeMap `/poi` API. It returns loosely-typed
//! POI records which [`convert_records`] turns into domain chargers, dropping
//! anything without a usable location.
//!
//! Key characteristics of OpenChargeMap:
//! - Every field is optional, coordinates included
//! - Status and connector types are numeric reference-data ids
//! - No information on carriageway side, amenities or ratings

mod client;
mod convert;
mod error;
mod mock;
mod types;

use std::future::Future;

use crate::domain::Coordinate;

pub use client::{OpenChargeMapClient, OpenChargeMapConfig};
pub use convert::{availability, connector_type, convert_poi, convert_poi_at, convert_records};
pub use error::DirectoryError;
pub use mock::StaticDirectory;
pub use types::{
    AddressInfo, Connection, ConnectionType, Country, CurrentType, DataProvider, Level, PoiOperator,
    PoiRecord, StatusType,
};

/// A source of charger POIs around a point.
pub trait ChargerDirectory: Send + Sync {
    /// Records within `radius_km` of `center`.
    fn search(
        &self,
        center: Coordinate,
        radius_km: u32,
    ) -> impl Future<Output = Result<Vec<PoiRecord>, DirectoryError>> + Send;

    /// Records from a still-fresh earlier search, without a remote call.
    /// Sources that keep nothing return `None`.
    fn cached(
        &self,
        _center: Coordinate,
        _radius_km: u32,
    ) -> impl Future<Output = Option<Vec<PoiRecord>>> + Send {
        std::future::ready(None)
    }
}
