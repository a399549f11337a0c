//! Geographic coordinate type.

use std::fmt;

/// Error returned when a latitude/longitude pair is not a usable coordinate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid coordinate: {reason}")]
pub struct InvalidCoordinate {
    reason: &'static str,
}

impl InvalidCoordinate {
    pub(crate) fn new(reason: &'static str) -> Self {
        Self { reason }
    }

    /// Why the coordinate was rejected.
    pub fn reason(&self) -> &'static str {
        self.reason
    }
}

/// A WGS84 latitude/longitude pair in degrees.
///
/// Unlike most domain types, a `Coordinate` can be built without validation
/// because it carries raw GPS fixes and provider data. Every consumer checks
/// [`Coordinate::is_valid`] on entry and treats an invalid value as the
/// fail-safe outcome (infinite distance, not ahead, out of bounds).
///
/// # Examples
///
/// ```
/// use charger_server::domain::Coordinate;
///
/// let rotterdam = Coordinate::parse(51.9225, 4.4792).unwrap();
/// assert!(rotterdam.is_valid());
///
/// assert!(Coordinate::parse(91.0, 0.0).is_err());
/// assert!(Coordinate::parse(f64::NAN, 0.0).is_err());
/// assert!(!Coordinate::new(0.0, 181.0).is_valid());
/// ```
#[derive(Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    /// Create a coordinate without validation.
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Create a coordinate, rejecting non-finite or out-of-range components.
    pub fn parse(latitude: f64, longitude: f64) -> Result<Self, InvalidCoordinate> {
        if !latitude.is_finite() || !longitude.is_finite() {
            return Err(InvalidCoordinate::new("components must be finite"));
        }
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(InvalidCoordinate::new("latitude must be within [-90, 90]"));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(InvalidCoordinate::new(
                "longitude must be within [-180, 180]",
            ));
        }
        Ok(Self::new(latitude, longitude))
    }

    /// Both components finite and within the legal ranges.
    pub fn is_valid(&self) -> bool {
        Self::parse(self.latitude, self.longitude).is_ok()
    }

    /// Offset by the given number of degrees.
    pub fn offset(&self, d_lat: f64, d_lon: f64) -> Self {
        Self::new(self.latitude + d_lat, self.longitude + d_lon)
    }
}

impl fmt::Debug for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Coordinate({}, {})", self.latitude, self.longitude)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}, {:.4}", self.latitude, self.longitude)
    }
}
