//! Bounded exponential backoff for store calls
//!
//! Only transient-classified store errors are retried; everything else
//! propagates on the first failure. Exhausting the attempt budget
//! surfaces as a single fatal error carrying the last transient cause.

use std::future::Future;
use std::time::Duration;
use tracing::warn;

use crate::error::{StoreError, StoreResult};

#[derive(Clone, Copy, Debug)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            base_delay: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts,
            base_delay,
        }
    }

    /// Delay before the retry following attempt `attempt` (0-based):
    /// doubles from the base each time
    fn delay(&self, attempt: u32) -> Duration {
        self.base_delay * (1u32 << attempt.min(16))
    }

    /// Run `op` until it succeeds, fails non-transiently, or the
    /// attempt budget runs out
    pub async fn run<T, F, Fut>(&self, mut op: F) -> StoreResult<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = StoreResult<T>>,
    {
        let mut last: Option<StoreError> = None;

        for attempt in 0..self.max_attempts {
            match op().await {
                Ok(value) => return Ok(value),
                Err(err) if err.is_transient() => {
                    warn!(
                        attempt = attempt + 1,
                        max_attempts = self.max_attempts,
                        error = %err,
                        "retrying transient store error"
                    );
                    last = Some(err);
                    if attempt + 1 < self.max_attempts {
                        tokio::time::sleep(self.delay(attempt)).await;
                    }
                }
                Err(err) => return Err(err),
            }
        }

        Err(StoreError::RetriesExhausted {
            attempts: self.max_attempts,
            last: last.map(|e| e.to_string()).unwrap_or_default(),
        })
    }
}
