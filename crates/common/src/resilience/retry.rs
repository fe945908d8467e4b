//! Retry decision for `429 Too Many Requests` responses
//!
//! The delay before retry `n` (the request has been executed `n` times) is
//!
//! ```text
//! delay = base * multiplier^n + jitter
//! base  = Retry-After header if present, else the default delay
//! jitter ∈ [0, max_jitter)
//! ```
//!
//! A Retry-After hint above the policy's ceiling is clamped to the ceiling.
//!
//! The server-advised delay alone is unreliable when several independent
//! clients hit the same organization, so it is grown exponentially and
//! desynchronized with jitter.

use std::time::Duration;

use rand::Rng;

/// Decision for whether to retry a request
#[derive(Debug, Clone, PartialEq)]
pub enum RetryDecision {
    /// Retry after `delay`, of which `jitter` is the random share
    RetryAfter {
        /// Total time to wait, jitter included
        delay: Duration,
        /// Random share of `delay`
        jitter: Duration,
    },
    /// Don't retry; the response is final
    Stop,
}

impl RetryDecision {
    /// Whether another attempt should be made.
    #[must_use]
    pub fn should_retry(&self) -> bool {
        matches!(self, Self::RetryAfter { .. })
    }
}

/// Retry policy for rate-limited requests.
///
/// Holds configuration only. Attempt counters belong to the caller's loop.
#[derive(Debug, Clone, PartialEq)]
pub struct RateLimitRetryPolicy {
    max_retries: u32,
    default_delay: Duration,
    multiplier: f64,
    max_jitter: Duration,
    max_retry_after: Duration,
}

impl RateLimitRetryPolicy {
    /// The only status that is ever retried.
    pub const RETRYABLE_STATUS: u16 = 429;

    /// Default ceiling for a server-advised delay.
    pub const DEFAULT_MAX_RETRY_AFTER: Duration = Duration::from_secs(3_600);

    /// Policy with jitter bounded by `default_delay`.
    #[must_use]
    pub fn new(max_retries: u32, default_delay: Duration, multiplier: f64) -> Self {
        Self {
            max_retries,
            default_delay,
            multiplier,
            max_jitter: default_delay,
            max_retry_after: Self::DEFAULT_MAX_RETRY_AFTER,
        }
    }

    /// Override the jitter ceiling (`Duration::ZERO` disables jitter).
    #[must_use]
    pub fn with_max_jitter(mut self, max_jitter: Duration) -> Self {
        self.max_jitter = max_jitter;
        self
    }

    /// Override the ceiling applied to a Retry-After hint.
    #[must_use]
    pub fn with_max_retry_after(mut self, max_retry_after: Duration) -> Self {
        self.max_retry_after = max_retry_after;
        self
    }

    /// Number of retries after the first attempt.
    #[must_use]
    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// Initial attempt plus retries.
    #[must_use]
    pub fn max_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }

    /// Base delay used when the server gives no hint.
    #[must_use]
    pub fn default_delay(&self) -> Duration {
        self.default_delay
    }

    /// Largest Retry-After hint honoured as given.
    #[must_use]
    pub fn max_retry_after(&self) -> Duration {
        self.max_retry_after
    }

    /// Decide on the response to execution number `attempt` (1-based).
    ///
    /// Retries only a 429 and only while `attempt <= max_retries`.
    #[must_use]
    pub fn decide(
        &self,
        status: u16,
        attempt: u32,
        retry_after: Option<Duration>,
        jitter: Duration,
    ) -> RetryDecision {
        if status != Self::RETRYABLE_STATUS || attempt > self.max_retries {
            return RetryDecision::Stop;
        }

        let delay = self.backoff(attempt, retry_after).saturating_add(jitter);
        RetryDecision::RetryAfter { delay, jitter }
    }

    /// Exponential part of the delay, without jitter.
    #[must_use]
    pub fn backoff(&self, attempt: u32, retry_after: Option<Duration>) -> Duration {
        let base = retry_after.map_or(self.default_delay, |hint| hint.min(self.max_retry_after));
        let exponent = i32::try_from(attempt).unwrap_or(i32::MAX);
        let factor = self.multiplier.powi(exponent);
        Duration::try_from_secs_f64(base.as_secs_f64() * factor).unwrap_or(Duration::MAX)
    }

    /// Uniform jitter in `[0, max_jitter)` at millisecond resolution.
    #[must_use]
    pub fn sample_jitter<R: Rng + ?Sized>(&self, rng: &mut R) -> Duration {
        let ceiling_ms = u64::try_from(self.max_jitter.as_millis()).unwrap_or(u64::MAX);
        if ceiling_ms == 0 {
            return Duration::ZERO;
        }
        Duration::from_millis(rng.gen_range(0..ceiling_ms))
    }
}

/// Parse a `Retry-After` header given in delta-seconds.
///
/// HTTP-date values are not supported and yield `None`, which makes the
/// policy fall back to its default delay.
#[must_use]
pub fn parse_retry_after(value: &str) -> Option<Duration> {
    value.trim().parse::<u64>().ok().map(Duration::from_secs)
}
