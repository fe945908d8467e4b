//! # umsync Domain
//!
//! Data model of the UMAPI group synchronization.
//!
//! This crate contains:
//! - Request types (`GroupDefinition`, `ActionCommand`, `Step`, `Batch`)
//! - Response types (`ActionCommandResponse`, `AccessToken`)
//! - The `SyncError` taxonomy and Result definition
//! - Configuration structures and protocol constants
//!
//! ## Architecture
//! - No dependencies on other umsync crates
//! - Wire formats are encoded and decoded by explicit functions on each type

#![warn(missing_docs)]

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
