//! Cooldown between remote directory calls.
//!
//! Only state shared across requests besides the cache and the blacklist.
//! The last-call time is a single atomic, claimed with compare-and-set, so
//! two concurrent requests can never both decide the cooldown has elapsed.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::time::Instant;

/// Sentinel for "no call yet". Stored timestamps are offset by one.
const NEVER: u64 = 0;

/// A claimed call slot.
///
/// Call [`Reservation::commit`] once the call has succeeded. Dropping an
/// uncommitted reservation hands the slot back, including when the request
/// is cancelled mid-call.
#[derive(Debug)]
#[must_use = "commit the reservation once the call succeeds"]
pub struct Reservation<'a> {
    limiter: &'a RateLimiter,
    previous: u64,
    claimed: u64,
    committed: bool,
}

impl Reservation<'_> {
    /// Keep the slot: the cooldown now runs from when it was claimed.
    pub fn commit(mut self) {
        self.committed = true;
    }
}

impl Drop for Reservation<'_> {
    fn drop(&mut self) {
        if !self.committed {
            self.limiter.roll_back(self.claimed, self.previous);
        }
    }
}

/// Enforces a minimum interval between successful remote calls.
#[derive(Debug)]
pub struct RateLimiter {
    cooldown: Duration,
    epoch: Instant,
    last_call: AtomicU64,
}

impl RateLimiter {
    pub fn new(cooldown: Duration) -> Self {
        Self {
            cooldown,
            epoch: Instant::now(),
            last_call: AtomicU64::new(NEVER),
        }
    }

    pub fn cooldown(&self) -> Duration {
        self.cooldown
    }

    /// Milliseconds since `epoch`, offset by one so zero stays free for
    /// [`NEVER`].
    fn now_stamp(&self) -> u64 {
        let elapsed = Instant::now().saturating_duration_since(self.epoch);
        u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX - 1) + 1
    }

    fn cooling(&self, last: u64, now: u64) -> bool {
        last != NEVER && u128::from(now - last.min(now)) < self.cooldown.as_millis()
    }

    /// Claim the next call slot, or `None` if still cooling down.
    pub fn try_acquire(&self) -> Option<Reservation<'_>> {
        let now = self.now_stamp();
        let mut last = self.last_call.load(Ordering::Acquire);

        loop {
            if self.cooling(last, now) {
                return None;
            }
            match self
                .last_call
                .compare_exchange(last, now, Ordering::AcqRel, Ordering::Acquire)
            {
                Ok(_) => {
                    return Some(Reservation {
                        limiter: self,
                        previous: last,
                        claimed: now,
                        committed: false,
                    });
                }
                Err(actual) => last = actual,
            }
        }
    }

    /// Undo a claim so the next request may try again straight away.
    /// No-op if another reservation has since been made.
    fn roll_back(&self, claimed: u64, previous: u64) {
        let _ = self.last_call.compare_exchange(
            claimed,
            previous,
            Ordering::AcqRel,
            Ordering::Acquire,
        );
    }

    /// Time left before the next call is allowed.
    pub fn remaining(&self) -> Duration {
        let last = self.last_call.load(Ordering::Acquire);
        if last == NEVER {
            return Duration::ZERO;
        }
        let since = Duration::from_millis(self.now_stamp().saturating_sub(last));
        self.cooldown.saturating_sub(since)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn first_call_is_allowed() {
        let limiter = RateLimiter::new(Duration::from_secs(10));
        assert_eq!(limiter.remaining(), Duration::ZERO);
        assert!(limiter.try_acquire().is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn refuses_within_cooldown() {
        let limiter = RateLimiter::new(Duration::from_secs(10));
        limiter.try_acquire().unwrap().commit();

        tokio::time::advance(Duration::from_secs(9)).await;
        assert!(limiter.try_acquire().is_none());
        assert_eq!(limiter.remaining(), Duration::from_secs(1));

        tokio::time::advance(Duration::from_secs(1)).await;
        assert!(limiter.try_acquire().is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn uncommitted_drop_rolls_back() {
        let limiter = RateLimiter::new(Duration::from_secs(10));
        let reservation = limiter.try_acquire().unwrap();
        drop(reservation);

        assert_eq!(limiter.remaining(), Duration::ZERO);
        assert!(limiter.try_acquire().is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn commit_keeps_the_slot() {
        let limiter = RateLimiter::new(Duration::from_secs(10));
        limiter.try_acquire().unwrap().commit();

        assert!(limiter.try_acquire().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn rollback_restores_previous_success() {
        let limiter = RateLimiter::new(Duration::from_secs(10));
        limiter.try_acquire().unwrap().commit();

        tokio::time::advance(Duration::from_secs(11)).await;
        drop(limiter.try_acquire().unwrap());

        // The earlier success is 11 s old, so the cooldown is still over.
        assert!(limiter.try_acquire().is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn stale_rollback_is_ignored() {
        let limiter = RateLimiter::new(Duration::from_secs(10));
        let first = limiter.try_acquire().unwrap();

        // Simulate a later claim landing before the first one is rolled back.
        tokio::time::advance(Duration::from_secs(1)).await;
        limiter.last_call.store(limiter.now_stamp(), Ordering::Release);

        drop(first);
        assert!(limiter.try_acquire().is_none());
    }

    #[tokio::test]
    async fn concurrent_acquire_admits_one() {
        let limiter = std::sync::Arc::new(RateLimiter::new(Duration::from_secs(60)));
        let handles: Vec<_> = (0..16)
            .map(|_| {
                let limiter = limiter.clone();
                tokio::spawn(async move {
                    let reservation = limiter.try_acquire();
                    let admitted = reservation.is_some();
                    if let Some(r) = reservation {
                        r.commit();
                    }
                    admitted
                })
            })
            .collect();

        let mut admitted = 0;
        for handle in handles {
            if handle.await.unwrap() {
                admitted += 1;
            }
        }
        assert_eq!(admitted, 1);
    }
}
