//! Device position capability.
//!
//! The finder asks for a single fix per request and never holds a
//! subscription: dropping the `request_once` future is how an abandoned
//! request stops the positioning hardware.

use std::future::Future;

use crate::domain::Coordinate;

/// Permission state of the positioning capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthorizationStatus {
    NotDetermined,
    Granted,
    Denied,
    Restricted,
}

/// Why no position fix could be obtained. The display text is written for
/// the driver.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LocationError {
    #[error(
        "Location access is required to find chargers near you. Allow location access for this app in your device settings."
    )]
    Denied,

    #[error(
        "Location services are restricted on this device. Please check your device restrictions or contact your administrator."
    )]
    Restricted,

    #[error("We need location access to find nearby chargers. Tap 'Allow' when prompted.")]
    NotDetermined,

    #[error("Unable to find your location: {0}")]
    Unavailable(String),
}

impl LocationError {
    /// Error implied by a status that does not permit a fix, if any.
    pub fn from_status(status: AuthorizationStatus) -> Option<Self> {
        match status {
            AuthorizationStatus::Granted => None,
            AuthorizationStatus::Denied => Some(LocationError::Denied),
            AuthorizationStatus::Restricted => Some(LocationError::Restricted),
            AuthorizationStatus::NotDetermined => Some(LocationError::NotDetermined),
        }
    }
}

/// A source of one-shot position fixes.
pub trait LocationProvider: Send + Sync {
    fn authorization(&self) -> AuthorizationStatus;

    /// Wait for one fix. Callers bound this with a deadline.
    fn request_once(&self) -> impl Future<Output = Result<Coordinate, LocationError>> + Send;
}

/// Check permission, then ask for a fix.
pub async fn locate<L: LocationProvider>(provider: &L) -> Result<Coordinate, LocationError> {
    if let Some(err) = LocationError::from_status(provider.authorization()) {
        return Err(err);
    }
    provider.request_once().await
}

/// Always reports the same coordinate.
#[derive(Debug, Clone, Copy)]
pub struct FixedLocation(pub Coordinate);

impl LocationProvider for FixedLocation {
    fn authorization(&self) -> AuthorizationStatus {
        AuthorizationStatus::Granted
    }

    async fn request_once(&self) -> Result<Coordinate, LocationError> {
        Ok(self.0)
    }
}

/// No positioning hardware, as on a server. Requests without a caller
/// supplied coordinate fall back to the corridor default.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLocation;

impl LocationProvider for NoLocation {
    fn authorization(&self) -> AuthorizationStatus {
        AuthorizationStatus::Granted
    }

    async fn request_once(&self) -> Result<Coordinate, LocationError> {
        Err(LocationError::Unavailable("no positioning source".to_string()))
    }
}
