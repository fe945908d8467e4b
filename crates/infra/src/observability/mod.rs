//! Observability infrastructure
//!
//! Structured logging through `tracing`. Library code only emits events;
//! binaries install the subscriber through [`logging::init_tracing`].

pub mod logging;

pub use logging::{init_tracing, LogFormat};
