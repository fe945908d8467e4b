//! Resilience patterns for rate-limited remote APIs
//!
//! UMAPI throttles callers with `429 Too Many Requests` and an optional
//! `Retry-After` header. [`RateLimitRetryPolicy`] is a pure decision
//! function over one response: it holds configuration only, so a single
//! instance can be shared by concurrent requests while each request keeps
//! its own attempt counter on its own stack.

pub mod retry;

// Re-export retry types
pub use retry::{parse_retry_after, RateLimitRetryPolicy, RetryDecision};
