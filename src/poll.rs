// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0
//! # Bounded polling
//!
//! Polls an async check with exponential backoff and jitter until it either
//! finishes, fails permanently or the deadline passes.
use rand::Rng;
use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;
use tracing::warn;

use crate::config::TimeoutsSection;

/// Lower bound of a single delay.
pub const MIN_DELAY: Duration = Duration::from_millis(100);
/// Upper bound of the total polling time.
pub const MAX_TIMEOUT: Duration = Duration::from_secs(7 * 24 * 3600);

/// Polling bounds.
#[derive(Clone, Debug, PartialEq)]
pub struct PollConfig {
    /// Total time after which polling gives up.
    pub timeout: Duration,
    /// Delay after the first unsuccessful attempt.
    pub initial_delay: Duration,
    /// Upper bound of a single delay.
    pub max_delay: Duration,
    /// Multiplier for the exponential backoff.
    pub backoff_multiplier: f64,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(120),
            initial_delay: Duration::from_secs(2),
            max_delay: Duration::from_secs(30),
            backoff_multiplier: 2.0,
        }
    }
}

impl PollConfig {
    pub fn new(timeout: Duration, initial_delay: Duration) -> Self {
        Self {
            timeout,
            initial_delay,
            ..Default::default()
        }
    }

    /// Bounds of the transient lookup failure retries.
    pub fn lookup(timeouts: &TimeoutsSection) -> Self {
        Self::new(timeouts.lookup(), timeouts.poll_interval())
    }

    /// Bounds of the destroy confirmation.
    pub fn check_destroy(timeouts: &TimeoutsSection) -> Self {
        Self::new(timeouts.check_destroy(), timeouts.poll_interval())
    }
}

/// Result of a single attempt.
#[derive(Debug, PartialEq)]
pub enum Attempt<T, E> {
    /// Polling is finished.
    Done(T),
    /// Not there yet. The reason is kept in case the deadline passes.
    Retry(E),
    /// Permanent failure. Polling stops.
    Fail(E),
}

/// Unsuccessful end of polling.
#[derive(Debug, PartialEq)]
pub enum PollError<E> {
    /// The deadline passed, carrying the reason of the last retry.
    Timeout(E),
    /// The check failed permanently.
    Failed(E),
}

impl<E> PollError<E> {
    pub fn into_inner(self) -> E {
        match self {
            Self::Timeout(err) | Self::Failed(err) => err,
        }
    }
}

/// Run `check` until it is done, fails or `config.timeout` passes.
pub async fn poll<F, Fut, T, E>(
    config: &PollConfig,
    operation_name: &str,
    mut check: F,
) -> Result<T, PollError<E>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Attempt<T, E>>,
    E: std::fmt::Display,
{
    let start = Instant::now();
    let deadline = start
        .checked_add(config.timeout.min(MAX_TIMEOUT))
        .unwrap_or(start);
    let max_delay = config.max_delay.max(MIN_DELAY);
    let mut attempt = 0u32;
    let mut delay = config.initial_delay.clamp(MIN_DELAY, max_delay);

    loop {
        attempt += 1;
        let reason = match check().await {
            Attempt::Done(val) => return Ok(val),
            Attempt::Fail(err) => return Err(PollError::Failed(err)),
            Attempt::Retry(reason) => reason,
        };

        let now = Instant::now();
        if now >= deadline {
            warn!(
                operation = %operation_name,
                attempt,
                reason = %reason,
                "giving up polling"
            );
            return Err(PollError::Timeout(reason));
        }

        // 0.5x to 1.5x of the delay, never past the deadline
        let jitter = rand::rng().random_range(0.5..1.5);
        let sleep = Duration::try_from_secs_f64(delay.as_secs_f64() * jitter)
            .unwrap_or(max_delay)
            .min(deadline - now);

        warn!(
            operation = %operation_name,
            attempt,
            reason = %reason,
            delay_ms = sleep.as_millis(),
            "not ready, polling again"
        );
        tokio::time::sleep(sleep).await;

        delay = Duration::try_from_secs_f64(delay.as_secs_f64() * config.backoff_multiplier)
            .unwrap_or(max_delay)
            .clamp(MIN_DELAY, max_delay);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};
    use tracing_test::traced_test;

    use super::*;

    fn fast(timeout: Duration) -> PollConfig {
        PollConfig {
            timeout,
            initial_delay: Duration::from_millis(1),
            max_delay: Duration::from_millis(5),
            backoff_multiplier: 2.0,
        }
    }

    #[tokio::test]
    async fn test_done_immediately() {
        let result: Result<i32, PollError<&str>> =
            poll(&fast(Duration::from_secs(1)), "op", || async { Attempt::Done(42) }).await;
        assert_eq!(Ok(42), result);
    }

    #[tokio::test]
    #[traced_test]
    async fn test_done_after_retries() {
        let count = Arc::new(AtomicU32::new(0));
        let c = count.clone();

        let result: Result<i32, PollError<&str>> = poll(&fast(Duration::from_secs(5)), "op", || {
            let c = c.clone();
            async move {
                if c.fetch_add(1, Ordering::SeqCst) < 2 {
                    Attempt::Retry("pending")
                } else {
                    Attempt::Done(42)
                }
            }
        })
        .await;

        assert_eq!(Ok(42), result);
        assert_eq!(3, count.load(Ordering::SeqCst));
        assert!(logs_contain("not ready, polling again"));
    }

    #[tokio::test]
    async fn test_fail_stops_polling() {
        let count = Arc::new(AtomicU32::new(0));
        let c = count.clone();

        let result: Result<i32, PollError<&str>> = poll(&fast(Duration::from_secs(5)), "op", || {
            let c = c.clone();
            async move {
                c.fetch_add(1, Ordering::SeqCst);
                Attempt::Fail("gone wrong")
            }
        })
        .await;

        assert_eq!(Err(PollError::Failed("gone wrong")), result);
        assert_eq!(1, count.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_timeout_keeps_last_reason() {
        let count = Arc::new(AtomicU32::new(0));
        let c = count.clone();

        let result: Result<(), PollError<String>> =
            poll(&fast(Duration::from_millis(30)), "op", || {
                let c = c.clone();
                async move { Attempt::Retry(format!("attempt {}", c.fetch_add(1, Ordering::SeqCst))) }
            })
            .await;

        let last = count.load(Ordering::SeqCst) - 1;
        assert_eq!(Err(PollError::Timeout(format!("attempt {last}"))), result);
        assert!(last >= 1);
    }

    #[tokio::test]
    async fn test_zero_delay_is_raised_to_minimum() {
        let count = Arc::new(AtomicU32::new(0));
        let c = count.clone();
        let config = PollConfig {
            timeout: Duration::from_millis(250),
            initial_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
            backoff_multiplier: 0.0,
        };

        let result: Result<(), PollError<&str>> = poll(&config, "op", || {
            let c = c.clone();
            async move {
                c.fetch_add(1, Ordering::SeqCst);
                Attempt::Retry("pending")
            }
        })
        .await;

        assert_eq!(Err(PollError::Timeout("pending")), result);
        // at most one attempt per 50ms (half of the minimum delay) plus the final one
        assert!(count.load(Ordering::SeqCst) <= 6);
    }

    #[tokio::test]
    async fn test_huge_timeout_does_not_overflow() {
        let config = PollConfig::new(Duration::MAX, Duration::MAX);
        let result: Result<i32, PollError<&str>> =
            poll(&config, "op", || async { Attempt::Done(1) }).await;
        assert_eq!(Ok(1), result);

        let result: Result<i32, PollError<&str>> =
            poll(&config, "op", || async { Attempt::Fail("gone wrong") }).await;
        assert_eq!(Err(PollError::Failed("gone wrong")), result);
    }
}
