//! Presence-gated timer state and transitions

use serde::{Deserialize, Serialize};

use crate::presence::PresenceSample;

/// Outcome of feeding a sample to the timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Started,
    Paused,
    Unchanged,
}

/// Timer state for tracking accumulated studying time.
///
/// `accumulated_ms` holds everything banked from finished running intervals.
/// `start_epoch_ms` only means something while `running` is true and marks
/// where the open interval began.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerState {
    pub running: bool,
    pub start_epoch_ms: u64,
    pub accumulated_ms: u64,
}

impl TimerState {
    /// Create a paused timer with nothing banked
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a running interval at `now_ms`. No-op when already running.
    pub fn start(&mut self, now_ms: u64) -> Transition {
        if self.running {
            return Transition::Unchanged;
        }
        self.running = true;
        self.start_epoch_ms = now_ms;
        Transition::Started
    }

    /// Close the open interval and bank it. No-op when already paused.
    pub fn pause(&mut self, now_ms: u64) -> Transition {
        if !self.running {
            return Transition::Unchanged;
        }
        self.accumulated_ms += now_ms.saturating_sub(self.start_epoch_ms);
        self.running = false;
        Transition::Paused
    }

    /// Apply one presence sample; the only transition entry point used by the loop
    pub fn on_sample(&mut self, sample: &PresenceSample, now_ms: u64) -> Transition {
        if sample.studying {
            self.start(now_ms)
        } else {
            self.pause(now_ms)
        }
    }

    /// Total studying time at `now_ms`, including the open interval
    pub fn elapsed_time(&self, now_ms: u64) -> u64 {
        if self.running {
            self.accumulated_ms + now_ms.saturating_sub(self.start_epoch_ms)
        } else {
            self.accumulated_ms
        }
    }

    /// Drop everything banked. A running timer keeps running from `now_ms`.
    pub fn reset(&mut self, now_ms: u64) {
        self.accumulated_ms = 0;
        if self.running {
            self.start_epoch_ms = now_ms;
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }
}
