//! Grouping Timer
//!
//! Separates bursts of log output with a blank line. Calls closer together than the
//! threshold land in the same visual block.

use std::time::{Duration, Instant};

pub const DEFAULT_THRESHOLD: Duration = Duration::from_secs(2);

/// Resettable one-shot timer.
#[derive(Debug, Clone)]
pub struct GroupingTimer {
    threshold: Duration,
    deadline: Option<Instant>,
}

impl Default for GroupingTimer {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD)
    }
}

impl GroupingTimer {
    pub fn new(threshold: Duration) -> Self {
        Self { threshold, deadline: None }
    }

    pub fn threshold(&self) -> Duration {
        self.threshold
    }

    /// Re-arm the timer at `now`. Returns whether it was still running, i.e. the
    /// previous reset happened less than `threshold` ago. The first reset is never
    /// running.
    pub fn reset(&mut self, now: Instant) -> bool {
        let was_running = self.deadline.map_or(false, |deadline| now < deadline);
        self.deadline = Some(now + self.threshold);
        was_running
    }
}
