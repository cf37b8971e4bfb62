//! Time source for rate limiting, backoff and query windows.
//!
//! Everything that waits or reads the current time goes through [`Clock`] so tests
//! can substitute a clock that advances instantly.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::fmt::Debug;
use std::time::{Duration, Instant};

#[async_trait]
pub trait Clock: Debug + Send + Sync {
    /// Monotonic time, used to measure spacing between requests.
    fn now(&self) -> Instant;

    /// Wall-clock time, used as the start of the forecast window.
    fn utc_now(&self) -> DateTime<Utc>;

    async fn sleep(&self, duration: Duration);
}

/// The real clock, backed by tokio timers.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioClock;

#[async_trait]
impl Clock for TokioClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn utc_now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
