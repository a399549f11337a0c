//! Bounded waits.

use std::future::Future;
use std::time::Duration;

/// The wrapped future did not finish in time and was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("deadline of {0:?} elapsed")]
pub struct DeadlineElapsed(pub Duration);

/// Race `future` against a timer. Whichever loses is dropped, which cancels
/// any I/O the future had in flight.
pub async fn with_deadline<F: Future>(
    limit: Duration,
    future: F,
) -> Result<F::Output, DeadlineElapsed> {
    tokio::time::timeout(limit, future)
        .await
        .map_err(|_| DeadlineElapsed(limit))
}
