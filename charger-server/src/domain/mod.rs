//! Domain types for the corridor charger finder.
//!
//! Value types that describe chargers, directions and the driver's request.
//! Types with a closed set of legal values (`RemainingRange`, `ChargerId`)
//! enforce it at construction; `Coordinate` is the exception, see its docs.

mod charger;
mod coordinate;
mod direction;
mod range;
mod result;

pub use charger::{
    Amenities, Availability, Charger, ChargerId, ChargerLocation, ConnectorType, HighwayAccess,
    InvalidChargerId, OperatorInfo, Pricing,
};
pub use coordinate::{Coordinate, InvalidCoordinate};
pub use direction::{HighwayDirection, InvalidDirection, TravelDirection};
pub use range::{InvalidRange, RemainingRange};
pub use result::{ChargerResult, format_distance, format_duration};
