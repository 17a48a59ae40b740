use std::time::Duration;

/// Exponential backoff with a hard deadline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PollPolicy {
    pub initial_interval: Duration,
    pub max_interval: Duration,
    pub multiplier: f64,
    pub timeout: Duration,
}

impl PollPolicy {
    /// Waiting for a freshly created index to report ready.
    pub fn index_ready(timeout: Duration) -> Self {
        Self {
            initial_interval: Duration::from_millis(250),
            max_interval: Duration::from_secs(2),
            multiplier: 2.0,
            timeout,
        }
    }

    /// Waiting for upserted vectors to become visible.
    pub fn settle(timeout: Duration) -> Self {
        Self {
            initial_interval: Duration::from_millis(250),
            max_interval: Duration::from_secs(1),
            multiplier: 2.0,
            timeout,
        }
    }

    pub fn next_interval(&self, current: Duration) -> Duration {
        current.mul_f64(self.multiplier.max(1.0)).min(self.max_interval)
    }
}
