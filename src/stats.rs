//! Run statistics collection.
//!
//! Tracks how many targets were handed to the host runner, how many were
//! skipped because their artifact was missing, and how long the run took.

use std::time::{Duration, Instant};

/// Counters for one run.
#[derive(Debug, Clone)]
pub struct RunStats {
    start_time: Instant,
    pub invoked: u64,
    pub skipped: u64,
}

impl Default for RunStats {
    fn default() -> Self {
        Self {
            start_time: Instant::now(),
            invoked: 0,
            skipped: 0,
        }
    }
}

impl RunStats {
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Emits the counters at `info` level.
    pub fn log(&self) {
        tracing::info!(
            invoked = self.invoked,
            skipped = self.skipped,
            elapsed_ms = self.elapsed().as_millis() as u64,
            "run finished"
        );
    }
}
