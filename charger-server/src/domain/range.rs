//! Driver-reported remaining range buckets.

use std::fmt;

/// Error returned when a range is not one of the supported buckets.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid remaining range: {0} km (expected 20, 40, 60 or 80)")]
pub struct InvalidRange(pub u32);

/// Remaining range as self-reported by the driver.
///
/// This is a coarse bucket picked from a short menu, not a continuous
/// measurement from the vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RemainingRange {
    Twenty,
    Forty,
    Sixty,
    Eighty,
}

impl RemainingRange {
    pub const ALL: [RemainingRange; 4] = [
        RemainingRange::Twenty,
        RemainingRange::Forty,
        RemainingRange::Sixty,
        RemainingRange::Eighty,
    ];

    pub fn km(&self) -> u32 {
        match self {
            RemainingRange::Twenty => 20,
            RemainingRange::Forty => 40,
            RemainingRange::Sixty => 60,
            RemainingRange::Eighty => 80,
        }
    }

    pub fn km_f64(&self) -> f64 {
        f64::from(self.km())
    }
}

impl TryFrom<u32> for RemainingRange {
    type Error = InvalidRange;

    fn try_from(km: u32) -> Result<Self, Self::Error> {
        match km {
            20 => Ok(RemainingRange::Twenty),
            40 => Ok(RemainingRange::Forty),
            60 => Ok(RemainingRange::Sixty),
            80 => Ok(RemainingRange::Eighty),
            other => Err(InvalidRange(other)),
        }
    }
}

impl fmt::Display for RemainingRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} km", self.km())
    }
}
