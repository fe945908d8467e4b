//! Sleep abstraction for testability
//!
//! Retry loops wait through a [`Sleeper`] instead of calling
//! `tokio::time::sleep` directly, so tests can record the requested delays
//! without real time passing.
//!
//! # Examples
//!
//! ```
//! use std::time::Duration;
//!
//! use umsync_common::time::{Sleeper, TokioSleeper};
//!
//! # async fn example() {
//! let sleeper = TokioSleeper;
//! sleeper.sleep(Duration::from_millis(5)).await;
//! # }
//! ```

use std::time::Duration;

use async_trait::async_trait;

/// Trait for suspending the current task
#[async_trait]
pub trait Sleeper: Send + Sync {
    /// Suspend for `duration`. Once called, the wait is not cancelled early.
    async fn sleep(&self, duration: Duration);
}

/// Real sleeper backed by the tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        if !duration.is_zero() {
            tokio::time::sleep(duration).await;
        }
    }
}
