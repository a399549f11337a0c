//! Request, outcome and error types for the finder.

use std::error::Error as _;
use std::time::Duration;

use crate::deadline::DeadlineElapsed;
use crate::directory::DirectoryError;
use crate::domain::{ChargerResult, Coordinate, RemainingRange, TravelDirection};
use crate::location::LocationError;

/// One driver request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FindRequest {
    pub direction: TravelDirection,
    pub range: RemainingRange,
    /// Caller-supplied position. Must be valid and on the corridor.
    pub location: Option<Coordinate>,
}

impl FindRequest {
    pub fn new(direction: TravelDirection, range: RemainingRange) -> Self {
        Self {
            direction,
            range,
            location: None,
        }
    }

    pub fn at(mut self, location: Coordinate) -> Self {
        self.location = Some(location);
        self
    }
}

/// Where the position used for ranking came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionSource {
    /// Given by the caller.
    Supplied,
    /// A live fix from the location provider.
    Device,
    /// Interpolated along the corridor.
    Estimated,
    /// The corridor's fixed reference point.
    Fallback,
}

impl PositionSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            PositionSource::Supplied => "supplied",
            PositionSource::Device => "device",
            PositionSource::Estimated => "estimated",
            PositionSource::Fallback => "fallback",
        }
    }
}

/// Where the ranked chargers came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSource {
    /// The charger directory.
    Live,
    /// Generated near the position.
    Synthetic,
}

impl DataSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataSource::Live => "live",
            DataSource::Synthetic => "synthetic",
        }
    }
}

/// Why the device position could not be used.
#[derive(Debug, Clone, PartialEq)]
pub enum LocationIssue {
    TimedOut,
    Provider(LocationError),
    /// The provider answered with a coordinate that is not a real position.
    InvalidFix(Coordinate),
}

/// Classified directory failure, for showing to the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteFailure {
    NoConnection,
    TimedOut,
    CannotConnect,
    ConnectionLost,
    /// The service answered with an error status.
    Server(u16),
    UnexpectedData,
    /// Transport failure of some other kind.
    Network,
    Other,
}

impl RemoteFailure {
    pub fn user_message(&self) -> &'static str {
        match self {
            RemoteFailure::NoConnection => {
                "No internet connection. Please check your network and try again."
            }
            RemoteFailure::TimedOut => {
                "Request timed out. Please check your connection and try again."
            }
            RemoteFailure::CannotConnect => {
                "Cannot connect to charging network servers. Please try again later."
            }
            RemoteFailure::ConnectionLost => {
                "Network connection lost. Please check your connection and try again."
            }
            RemoteFailure::UnexpectedData => {
                "Received unexpected data from charging network. Please try again."
            }
            RemoteFailure::Network => {
                "Network error occurred. Please check your connection and try again."
            }
            RemoteFailure::Server(_) | RemoteFailure::Other => {
                "Unable to find chargers in this area. Please try a different location or check back later."
            }
        }
    }
}

impl From<&DirectoryError> for RemoteFailure {
    fn from(err: &DirectoryError) -> Self {
        match err {
            DirectoryError::Http(e) => classify_transport(e),
            DirectoryError::Json { .. } => RemoteFailure::UnexpectedData,
            DirectoryError::Api { status, .. } => RemoteFailure::Server(*status),
            DirectoryError::RateLimited => RemoteFailure::Server(429),
            DirectoryError::Unauthorized => RemoteFailure::Server(401),
            DirectoryError::Io { .. } => RemoteFailure::Other,
        }
    }
}

impl From<DeadlineElapsed> for RemoteFailure {
    fn from(_: DeadlineElapsed) -> Self {
        RemoteFailure::TimedOut
    }
}

fn classify_transport(err: &reqwest::Error) -> RemoteFailure {
    if err.is_timeout() {
        return RemoteFailure::TimedOut;
    }
    if err.is_decode() {
        return RemoteFailure::UnexpectedData;
    }
    if let Some(status) = err.status() {
        return RemoteFailure::Server(status.as_u16());
    }

    let io_kind = io_error_kind(err);
    if err.is_connect() {
        return match io_kind {
            Some(std::io::ErrorKind::NetworkUnreachable | std::io::ErrorKind::NetworkDown) => {
                RemoteFailure::NoConnection
            }
            _ => RemoteFailure::CannotConnect,
        };
    }
    match io_kind {
        Some(std::io::ErrorKind::ConnectionReset)
        | Some(std::io::ErrorKind::ConnectionAborted)
        | Some(std::io::ErrorKind::BrokenPipe)
        | Some(std::io::ErrorKind::UnexpectedEof) => RemoteFailure::ConnectionLost,
        _ => RemoteFailure::Network,
    }
}

/// Kind of the first I/O error in the source chain.
fn io_error_kind(err: &reqwest::Error) -> Option<std::io::ErrorKind> {
    let mut source = err.source();
    while let Some(e) = source {
        if let Some(io) = e.downcast_ref::<std::io::Error>() {
            return Some(io.kind());
        }
        source = e.source();
    }
    None
}

/// A recovered problem the driver may want to know about.
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    /// Ranked from an approximate position instead of a fix.
    LocationUnavailable(LocationIssue),
    /// Directory call failed; results are synthetic.
    RemoteUnavailable(RemoteFailure),
    /// Directory skipped during cooldown; results are synthetic.
    RateLimited { retry_in: Duration },
}

impl Notice {
    /// Text for the driver. Rate limiting is silent.
    pub fn message(&self) -> Option<String> {
        match self {
            Notice::LocationUnavailable(LocationIssue::TimedOut) => {
                Some("Using approximate location (GPS taking longer than expected)".to_string())
            }
            Notice::LocationUnavailable(LocationIssue::Provider(e)) => {
                Some(format!("Using approximate location. {e}"))
            }
            Notice::LocationUnavailable(LocationIssue::InvalidFix(_)) => Some(
                "Using approximate location (unable to determine a valid GPS position)".to_string(),
            ),
            Notice::RemoteUnavailable(failure) => Some(failure.user_message().to_string()),
            Notice::RateLimited { .. } => None,
        }
    }
}

/// What a request produced.
#[derive(Debug, Clone)]
pub struct FindOutcome {
    /// Ranked best first. May be empty.
    pub results: Vec<ChargerResult>,
    pub position: Coordinate,
    pub position_source: PositionSource,
    pub data_source: DataSource,
    /// Driver-facing summary of the notices, if any need showing.
    pub advisory: Option<String>,
    pub notices: Vec<Notice>,
}

impl FindOutcome {
    pub(crate) fn advisory_for(notices: &[Notice]) -> Option<String> {
        let messages: Vec<String> = notices.iter().filter_map(Notice::message).collect();
        if messages.is_empty() {
            None
        } else {
            Some(messages.join(" "))
        }
    }
}

/// Why a caller-supplied position was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidLocationReason {
    NotACoordinate,
    OffCorridor,
}

impl std::fmt::Display for InvalidLocationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            InvalidLocationReason::NotACoordinate => {
                "Invalid location coordinates. Please try again or enable location services."
            }
            InvalidLocationReason::OffCorridor => {
                "Location appears to be outside the Rotterdam-Santa Pola route. Please check your location or use the app while traveling this route."
            }
        })
    }
}

/// The only way a request can fail.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FindError {
    #[error("{reason}")]
    InvalidLocation {
        coordinate: Coordinate,
        reason: InvalidLocationReason,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directory_errors_classify() {
        let json = DirectoryError::Json {
            message: "x".into(),
            body: None,
        };
        assert_eq!(RemoteFailure::from(&json), RemoteFailure::UnexpectedData);

        let api = DirectoryError::Api {
            status: 503,
            message: String::new(),
        };
        assert_eq!(RemoteFailure::from(&api), RemoteFailure::Server(503));
        assert_eq!(RemoteFailure::from(&DirectoryError::RateLimited), RemoteFailure::Server(429));
        assert_eq!(
            RemoteFailure::from(DeadlineElapsed(Duration::from_secs(10))),
            RemoteFailure::TimedOut
        );
    }

    #[tokio::test]
    async fn refused_connection_is_cannot_connect() {
        // Bind then drop to get a port nothing listens on.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = reqwest::Client::builder().no_proxy().build().unwrap();
        let err = client.get(format!("http://{addr}/poi")).send().await.unwrap_err();
        let err = DirectoryError::from(err);
        assert_eq!(RemoteFailure::from(&err), RemoteFailure::CannotConnect);
    }

    #[test]
    fn messages() {
        assert_eq!(
            RemoteFailure::UnexpectedData.user_message(),
            "Received unexpected data from charging network. Please try again."
        );
        assert!(RemoteFailure::Server(500).user_message().starts_with("Unable to find chargers"));
        assert_eq!(Notice::RateLimited { retry_in: Duration::ZERO }.message(), None);
        assert_eq!(
            Notice::LocationUnavailable(LocationIssue::TimedOut).message().unwrap(),
            "Using approximate location (GPS taking longer than expected)"
        );
    }

    #[test]
    fn advisory_joins_messages() {
        let notices = vec![
            Notice::LocationUnavailable(LocationIssue::TimedOut),
            Notice::RateLimited { retry_in: Duration::ZERO },
            Notice::RemoteUnavailable(RemoteFailure::TimedOut),
        ];
        let advisory = FindOutcome::advisory_for(&notices).unwrap();
        assert!(advisory.starts_with("Using approximate location"));
        assert!(
            advisory.ends_with("Request timed out. Please check your connection and try again.")
        );

        assert_eq!(FindOutcome::advisory_for(&[]), None);
    }

    #[test]
    fn invalid_location_messages() {
        let err = FindError::InvalidLocation {
            coordinate: Coordinate::new(40.4, -3.7),
            reason: InvalidLocationReason::OffCorridor,
        };
        assert!(err.to_string().starts_with("Location appears to be outside"));
    }
}
