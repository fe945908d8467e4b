//! Testing utilities and helpers
//!
//! - [`RecordingSleeper`]: a [`Sleeper`](crate::time::Sleeper) that records
//!   each requested delay and returns immediately

mod sleeper;

pub use sleeper::RecordingSleeper;
