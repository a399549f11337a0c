//! Travel and highway-access directions along the corridor.

use std::fmt;
use std::str::FromStr;

/// Error returned when parsing an unknown direction name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid travel direction: {0:?} (expected \"forward\" or \"reverse\")")]
pub struct InvalidDirection(String);

/// The two directions of travel along the one fixed corridor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TravelDirection {
    /// Rotterdam → Santa Pola (southbound).
    RotterdamToSantaPola,
    /// Santa Pola → Rotterdam (northbound).
    SantaPolaToRotterdam,
}

impl TravelDirection {
    pub const ALL: [TravelDirection; 2] = [
        TravelDirection::RotterdamToSantaPola,
        TravelDirection::SantaPolaToRotterdam,
    ];

    /// Short machine name used in the HTTP API.
    pub fn as_str(&self) -> &'static str {
        match self {
            TravelDirection::RotterdamToSantaPola => "forward",
            TravelDirection::SantaPolaToRotterdam => "reverse",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            TravelDirection::RotterdamToSantaPola => "Rotterdam → Santa Pola",
            TravelDirection::SantaPolaToRotterdam => "Santa Pola → Rotterdam",
        }
    }

    pub fn reversed(&self) -> Self {
        match self {
            TravelDirection::RotterdamToSantaPola => TravelDirection::SantaPolaToRotterdam,
            TravelDirection::SantaPolaToRotterdam => TravelDirection::RotterdamToSantaPola,
        }
    }
}

impl FromStr for TravelDirection {
    type Err = InvalidDirection;

    /// Accepts `forward`/`reverse` and the long snake-case names,
    /// case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "forward" | "rotterdam_to_santa_pola" | "south" => {
                Ok(TravelDirection::RotterdamToSantaPola)
            }
            "reverse" | "santa_pola_to_rotterdam" | "north" => {
                Ok(TravelDirection::SantaPolaToRotterdam)
            }
            _ => Err(InvalidDirection(s.to_string())),
        }
    }
}

impl fmt::Display for TravelDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// The carriageway(s) from which a charger can be reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HighwayDirection {
    /// Only reachable when travelling Rotterdam → Santa Pola.
    Forward,
    /// Only reachable when travelling Santa Pola → Rotterdam.
    Reverse,
    Both,
}

impl HighwayDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            HighwayDirection::Forward => "rotterdam_to_santa_pola",
            HighwayDirection::Reverse => "santa_pola_to_rotterdam",
            HighwayDirection::Both => "both_directions",
        }
    }

    /// Whether a driver travelling in `travel` can pull in.
    pub fn is_compatible(&self, travel: TravelDirection) -> bool {
        match self {
            HighwayDirection::Both => true,
            HighwayDirection::Forward => travel == TravelDirection::RotterdamToSantaPola,
            HighwayDirection::Reverse => travel == TravelDirection::SantaPolaToRotterdam,
        }
    }
}

impl From<TravelDirection> for HighwayDirection {
    fn from(direction: TravelDirection) -> Self {
        match direction {
            TravelDirection::RotterdamToSantaPola => HighwayDirection::Forward,
            TravelDirection::SantaPolaToRotterdam => HighwayDirection::Reverse,
        }
    }
}
