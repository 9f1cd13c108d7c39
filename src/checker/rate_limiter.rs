//! Request pacer for TikTok probing.
//!
//! Enforces a minimum interval between outbound requests so bulk checks do
//! not trip TikTok's rate limiting, and lets the checker push the next slot
//! further out after a denied (HTTP 403) response.

use std::time::{Duration, Instant};

use tokio::sync::Mutex;
use tracing::{debug, warn};

/// Rate limiter that enforces minimum intervals between requests.
#[derive(Debug)]
pub struct RateLimiter {
    /// Minimum duration between allowed requests.
    min_interval: Duration,

    /// Earliest instant at which the next request may go out.
    next_allowed: Mutex<Option<Instant>>,
}

impl RateLimiter {
    /// Creates a new rate limiter with the specified minimum interval.
    #[must_use]
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            next_allowed: Mutex::new(None),
        }
    }

    /// Creates a rate limiter from milliseconds.
    #[must_use]
    pub fn from_millis(millis: u64) -> Self {
        Self::new(Duration::from_millis(millis))
    }

    /// Waits until a request is allowed, then reserves the next slot.
    ///
    /// Returns the duration waited (0 if no wait was needed).
    pub async fn wait_and_acquire(&self) -> Duration {
        let mut next = self.next_allowed.lock().await;

        let wait_duration = next
            .map(|deadline| deadline.saturating_duration_since(Instant::now()))
            .unwrap_or(Duration::ZERO);

        if !wait_duration.is_zero() {
            debug!("Rate limiter: waiting {:?} before next request", wait_duration);
            tokio::time::sleep(wait_duration).await;
        }

        *next = Some(Instant::now() + self.min_interval);
        wait_duration
    }

    /// Checks if a request is currently allowed without blocking.
    pub async fn is_allowed(&self) -> bool {
        let next = self.next_allowed.lock().await;
        next.is_none_or(|deadline| Instant::now() >= deadline)
    }

    /// Returns the time remaining until the next request is allowed.
    pub async fn time_until_allowed(&self) -> Duration {
        let next = self.next_allowed.lock().await;
        next.map(|deadline| deadline.saturating_duration_since(Instant::now()))
            .unwrap_or(Duration::ZERO)
    }

    /// Pushes the next slot at least `backoff` into the future.
    ///
    /// Called after a denied response; never moves an existing deadline
    /// closer.
    pub async fn penalize(&self, backoff: Duration) {
        warn!("Rate limiter: backing off for {:?} after denied request", backoff);
        let mut next = self.next_allowed.lock().await;
        let candidate = Instant::now() + backoff;
        *next = Some(next.map_or(candidate, |deadline| deadline.max(candidate)));
    }

    /// Resets the rate limiter, allowing an immediate request.
    pub async fn reset(&self) {
        let mut next = self.next_allowed.lock().await;
        *next = None;
    }
}
