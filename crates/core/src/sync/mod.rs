//! Group synchronization: command building, batching and evaluation
//!
//! A run turns every [`GroupDefinition`](umsync_domain::GroupDefinition) into
//! one action command, splits the commands into batches the remote accepts
//! in a single request and sends the batches one after another. The first
//! failing batch aborts the run.

pub mod batcher;
pub mod builder;
pub mod evaluator;
pub mod synchronizer;

pub use batcher::partition;
pub use builder::CommandBuilder;
pub use evaluator::{Outcome, ResponseEvaluator};
pub use synchronizer::{GroupSynchronizer, SyncSummary};
