//! Bounded wait for a dependency to come up.
//!
//! The store may still be starting when the server process launches, so the
//! first connection is retried on a fixed interval. Running out of attempts
//! is reported to the caller, which is expected to give up.

use std::{fmt, future::Future, time::Duration};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total number of probes, including the first one.
    pub max_attempts: u32,
    /// Pause between a failed probe and the next one.
    pub interval: Duration,
}

impl RetryPolicy {
    pub const fn new(max_attempts: u32, interval: Duration) -> Self {
        Self {
            max_attempts,
            interval,
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(10, Duration::from_secs(3))
    }
}

#[derive(Debug, thiserror::Error)]
#[error("gave up after {attempts} attempts: {source}")]
pub struct ReadinessError<E> {
    pub attempts: u32,
    #[source]
    pub source: E,
}

/// Run `probe` until it succeeds or `policy.max_attempts` probes have failed.
///
/// Returns the number of probes it took. There is no pause after the last
/// failed probe. A policy of zero attempts still probes once.
pub async fn await_ready<F, Fut, E>(
    policy: RetryPolicy,
    what: &str,
    mut probe: F,
) -> Result<u32, ReadinessError<E>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<(), E>>,
    E: fmt::Display,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 0;

    loop {
        attempt += 1;

        match probe().await {
            Ok(()) => {
                tracing::info!("Connected to {} (attempt {}/{})", what, attempt, max_attempts);
                return Ok(attempt);
            }
            Err(e) if attempt >= max_attempts => {
                tracing::error!("Giving up on {} after {} attempts: {}", what, attempt, e);
                return Err(ReadinessError {
                    attempts: attempt,
                    source: e,
                });
            }
            Err(e) => {
                tracing::warn!(
                    "Waiting for {}... ({}/{}): {}",
                    what,
                    attempt,
                    max_attempts,
                    e
                );
                tokio::time::sleep(policy.interval).await;
            }
        }
    }
}
