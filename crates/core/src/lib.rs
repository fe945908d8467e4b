//! # umsync Core
//!
//! Pure synchronization logic - no infrastructure dependencies.
//!
//! This crate contains:
//! - Port interfaces (traits) for token acquisition and command transport
//! - Command building, batching and response evaluation
//! - The [`GroupSynchronizer`] use case
//!
//! ## Architecture Principles
//! - Only depends on `umsync-domain`
//! - No HTTP or configuration loading
//! - All external dependencies via traits

pub mod ports;
pub mod sync;

pub use ports::{AccessTokenProvider, ActionCommandTransport, ExternalGroupManagement};
pub use sync::{
    partition, CommandBuilder, GroupSynchronizer, Outcome, ResponseEvaluator, SyncSummary,
};
