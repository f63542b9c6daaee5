// app/delay.rs

use std::time::{Duration, Instant};

use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelayState {
    pub started_at: Instant,
    pub duration: Duration,
}

/// Single pending re-entry delay. A new delay always replaces the old one.
#[derive(Debug, Default, Clone)]
pub struct DelayScheduler {
    pending: Option<DelayState>,
}

impl DelayScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, now: Instant, duration: Duration) {
        debug!("DelayScheduler: next entry in {} ms", duration.as_millis());
        self.pending = Some(DelayState {
            started_at: now,
            duration,
        });
    }

    pub fn ready(&self, now: Instant) -> bool {
        match self.pending {
            None => true,
            Some(d) => now.saturating_duration_since(d.started_at) >= d.duration,
        }
    }

    pub fn remaining(&self, now: Instant) -> Duration {
        match self.pending {
            None => Duration::ZERO,
            Some(d) => d
                .duration
                .saturating_sub(now.saturating_duration_since(d.started_at)),
        }
    }

    pub fn pending(&self) -> Option<DelayState> {
        self.pending
    }
}
