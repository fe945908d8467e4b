//! Shared test helpers for `umsync-core` integration tests.
//!
//! In-memory implementations of the core ports that record what the
//! synchronizer asked of them.

pub mod ports;
