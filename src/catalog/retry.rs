//! Bounded fixed-delay retry for upstream calls.
//!
//! The policy is decoupled from the HTTP call itself: it re-runs any async
//! operation whose error reports [`CatalogError::is_transient`], sleeping a
//! fixed delay between attempts. Authorization failures and semantic
//! "no results" responses are terminal and returned on the first attempt.

use std::future::Future;
use std::time::Duration;

use tracing::warn;

use super::error::CatalogError;

/// Fixed-count, fixed-delay retry policy applied to every catalog operation.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Total attempts, including the first one. Never zero.
    pub max_attempts: u32,
    /// Sleep between consecutive attempts.
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            delay: Duration::from_secs(2),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            delay,
        }
    }

    /// Run `f`, retrying transient failures up to the attempt budget.
    ///
    /// Returns the first success, the first terminal error, or the last
    /// transient error once the budget is exhausted.
    pub async fn run<T, F, Fut>(&self, op: &'static str, mut f: F) -> Result<T, CatalogError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, CatalogError>>,
    {
        let mut attempt = 1u32;
        loop {
            match f().await {
                Ok(value) => return Ok(value),
                Err(e) if e.is_transient() && attempt < self.max_attempts => {
                    warn!(
                        op,
                        attempt,
                        max_attempts = self.max_attempts,
                        delay_secs = self.delay.as_secs(),
                        error = %e,
                        "transient failure, retrying"
                    );
                    tokio::time::sleep(self.delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}
