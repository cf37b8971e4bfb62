use crate::fetch::clock::Clock;
use log::debug;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

/// Enforces a minimum spacing between outbound requests.
///
/// One limiter is shared by every request a client makes, whatever the endpoint.
/// Callers are only ever delayed, never rejected.
#[derive(Debug)]
pub struct RateLimiter {
    min_interval: Duration,
    last_grant: Mutex<Option<Instant>>,
    clock: Arc<dyn Clock>,
}

impl RateLimiter {
    pub fn new(min_interval: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            min_interval,
            last_grant: Mutex::new(None),
            clock,
        }
    }

    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Waits until `min_interval` has passed since the previous grant, then records a new one.
    ///
    /// The lock is held across the wait so concurrent callers queue up and are granted
    /// one interval apart.
    pub async fn await_slot(&self) {
        let mut last_grant = self.last_grant.lock().await;
        if let Some(previous) = *last_grant {
            let elapsed = self.clock.now().saturating_duration_since(previous);
            if elapsed < self.min_interval {
                let delay = self.min_interval - elapsed;
                debug!("Rate limiting: waiting {:.1}s before next request", delay.as_secs_f64());
                self.clock.sleep(delay).await;
            }
        }
        *last_grant = Some(self.clock.now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ManualClock;

    #[tokio::test]
    async fn first_slot_is_immediate() {
        let clock = Arc::new(ManualClock::new());
        let limiter = RateLimiter::new(Duration::from_secs(2), clock.clone());
        limiter.await_slot().await;
        assert!(clock.sleeps().is_empty());
    }

    #[tokio::test]
    async fn back_to_back_slots_are_spaced() {
        let clock = Arc::new(ManualClock::new());
        let limiter = RateLimiter::new(Duration::from_secs(2), clock.clone());
        limiter.await_slot().await;
        limiter.await_slot().await;
        limiter.await_slot().await;
        assert_eq!(clock.sleeps(), [Duration::from_secs(2), Duration::from_secs(2)]);
    }

    #[tokio::test]
    async fn only_the_remainder_is_waited() {
        let clock = Arc::new(ManualClock::new());
        let limiter = RateLimiter::new(Duration::from_secs(5), clock.clone());
        limiter.await_slot().await;
        clock.advance(Duration::from_secs(3));
        limiter.await_slot().await;
        assert_eq!(clock.sleeps(), [Duration::from_secs(2)]);

        clock.advance(Duration::from_secs(10));
        limiter.await_slot().await;
        assert_eq!(clock.sleeps().len(), 1);
    }
}
