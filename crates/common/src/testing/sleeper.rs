use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crate::time::Sleeper;

/// Sleeper that records delays instead of waiting.
///
/// Clones share the same record, so a test can keep one handle and give
/// another to the code under test.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
///
/// use umsync_common::testing::RecordingSleeper;
/// use umsync_common::time::Sleeper;
///
/// # async fn example() {
/// let sleeper = RecordingSleeper::new();
/// sleeper.sleep(Duration::from_secs(3)).await;
/// assert_eq!(sleeper.recorded(), vec![Duration::from_secs(3)]);
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct RecordingSleeper {
    delays: Arc<Mutex<Vec<Duration>>>,
}

impl RecordingSleeper {
    /// Sleeper with an empty record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Delays requested so far, in call order.
    #[must_use]
    pub fn recorded(&self) -> Vec<Duration> {
        self.delays.lock().map(|delays| delays.clone()).unwrap_or_default()
    }

    /// Number of sleeps requested so far.
    #[must_use]
    pub fn count(&self) -> usize {
        self.delays.lock().map(|delays| delays.len()).unwrap_or_default()
    }
}

#[async_trait]
impl Sleeper for RecordingSleeper {
    async fn sleep(&self, duration: Duration) {
        if let Ok(mut delays) = self.delays.lock() {
            delays.push(duration);
        }
    }
}
