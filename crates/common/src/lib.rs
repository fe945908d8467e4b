//! Common utilities shared across umsync crates.
//!
//! - [`resilience`]: the rate-limit retry decision for UMAPI requests
//! - [`time`]: sleeping behind a trait so retry loops can be tested without
//!   waiting
//! - [`testing`]: recording test doubles (`test-utils` feature)

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::complexity, clippy::suspicious)]

pub mod resilience;
pub mod time;

// Testing utilities
// ---------------------------------------------------------------
#[cfg(any(feature = "test-utils", test))]
pub mod testing;

// Re-export commonly used types and traits for convenience
// ------------------------
pub use resilience::{parse_retry_after, RateLimitRetryPolicy, RetryDecision};
pub use time::{Sleeper, TokioSleeper};
