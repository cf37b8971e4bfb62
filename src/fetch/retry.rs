use crate::error::{EdrForecastError, ErrorKind};
use crate::fetch::clock::Clock;
use log::{error, warn};
use std::future::Future;
use std::time::Duration;

/// Bounded retry with exponential backoff.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    backoff_base: Duration,
}

impl RetryPolicy {
    /// `max_attempts` below one is treated as one.
    pub fn new(max_attempts: u32, backoff_base: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            backoff_base,
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Delay after the failed attempt with 0-based index `attempt`: `base * 2^attempt`.
    pub fn backoff(&self, attempt: u32) -> Duration {
        let factor = 2u32.checked_pow(attempt).unwrap_or(u32::MAX);
        self.backoff_base.saturating_mul(factor)
    }

    /// Runs `operation` until it succeeds, fails fatally, or the attempts run out.
    ///
    /// The closure receives the 0-based attempt index. There is no sleep after the
    /// last attempt. Once exhausted, the last error is returned inside
    /// [`EdrForecastError::RetriesExhausted`].
    pub async fn run<T, F, Fut>(
        &self,
        clock: &dyn Clock,
        mut operation: F,
    ) -> Result<T, EdrForecastError>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T, EdrForecastError>>,
    {
        let mut attempt = 0;
        loop {
            let err = match operation(attempt).await {
                Ok(value) => return Ok(value),
                Err(err) => err,
            };

            if err.kind() == ErrorKind::Fatal {
                error!("Giving up after fatal error: {}", err);
                return Err(err);
            }

            if attempt + 1 >= self.max_attempts {
                error!("Giving up after {} attempts: {}", self.max_attempts, err);
                return Err(EdrForecastError::RetriesExhausted {
                    attempts: self.max_attempts,
                    last: Box::new(err),
                });
            }

            let delay = self.backoff(attempt);
            warn!(
                "Attempt {}/{} failed: {}. Retrying in {:.1}s",
                attempt + 1,
                self.max_attempts,
                err,
                delay.as_secs_f64()
            );
            clock.sleep(delay).await;
            attempt += 1;
        }
    }
}
