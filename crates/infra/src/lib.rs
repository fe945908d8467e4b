//! # umsync Infrastructure
//!
//! Infrastructure implementations of the core ports.
//!
//! This crate contains:
//! - The retrying HTTP client (reqwest)
//! - The IMS token provider and the UMAPI action transport
//! - The [`ImsUserManagement`] facade wiring both into a synchronizer
//! - Configuration loading and tracing initialisation
//!
//! ## Architecture
//! - Implements traits defined in `umsync-core`
//! - Contains all "impure" code (network I/O, environment, files)

pub mod config;
pub mod errors;
pub mod http;
pub mod observability;
pub mod umapi;

// Re-export commonly used items
pub use errors::InfraError;
pub use http::{HttpClient, HttpClientBuilder};
pub use umapi::{ClientCredentialsTokenProvider, ImsUserManagement, UmapiClient};
