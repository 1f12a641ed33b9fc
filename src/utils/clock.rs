//! Monotonic millisecond clock

use tokio::time::Instant;

/// Milliseconds since a fixed origin, immune to wall-clock adjustment.
///
/// Built on tokio's `Instant`, so paused test runtimes control it too.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }

    pub fn now_ms(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}
