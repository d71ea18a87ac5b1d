//! Bounded retry with exponential backoff and full jitter.
//!
//! Only transient storage faults (connection resets, pool timeouts) are
//! retried; query-shaped errors surface immediately. Each attempt acquires
//! a fresh connection from the pool, so a dead connection is never reused.

use std::future::Future;
use std::time::Duration;

use rand::Rng;

/// Retry schedule for transient storage faults.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Total attempts, including the first.
    pub max_attempts: u32,
    /// Backoff cap before the first retry; doubles per attempt.
    pub base_delay_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay_ms: 50,
        }
    }
}

impl RetryPolicy {
    /// Run `op` until it succeeds, fails permanently, or attempts run out.
    ///
    /// # Errors
    ///
    /// Returns the last error: immediately for permanent errors, after
    /// exhausting attempts for transient ones.
    pub async fn run<T, F, Fut>(&self, op: F) -> Result<T, sqlx::Error>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T, sqlx::Error>>,
    {
        let mut attempt: u32 = 0;
        loop {
            attempt += 1;
            match op().await {
                Ok(value) => return Ok(value),
                Err(err) if is_transient(&err) && attempt < self.max_attempts => {
                    let delay = self.jittered_delay(attempt);
                    tracing::warn!(
                        error = %err,
                        attempt,
                        delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                        "Transient storage error, retrying"
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(err) => return Err(err),
            }
        }
    }

    /// Full jitter: uniform in `[0, base * 2^(attempt-1)]`.
    fn jittered_delay(&self, attempt: u32) -> Duration {
        let cap = self
            .base_delay_ms
            .saturating_mul(1_u64 << attempt.saturating_sub(1).min(16));
        Duration::from_millis(rand::rng().random_range(0..=cap))
    }
}

/// Whether an error is worth retrying on a fresh connection.
pub fn is_transient(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Io(_) | sqlx::Error::PoolTimedOut)
}
