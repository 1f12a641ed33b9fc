//! Presence samples and the sampler-level condition that accompanies them

use serde::{Deserialize, Serialize};

use crate::error::InvalidInputState;

/// One tick's presence judgment. Consumed by the timer and then dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresenceSample {
    pub present: bool,
    /// Gating signal for the timer. Currently studying ⇔ present.
    pub studying: bool,
    pub timestamp_ms: u64,
}

impl PresenceSample {
    /// Build a sample from raw presence using the current gating policy
    pub fn from_presence(present: bool, timestamp_ms: u64) -> Self {
        Self {
            present,
            studying: present,
            timestamp_ms,
        }
    }

    /// Nobody in frame (or no readable frame at all)
    pub fn absent(timestamp_ms: u64) -> Self {
        Self::from_presence(false, timestamp_ms)
    }
}

/// What the sampler knew about its source and input on the latest tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceCondition {
    /// No media stream attached yet
    AwaitingMedia,
    /// Media acquisition failed; sticky
    MediaError,
    /// Source not initialized; retrying on a cooldown
    SourceLoading,
    /// Source finished initializing on this tick
    SourceReady,
    /// Input exists but is paused or ended
    InputUnreadable(InvalidInputState),
    /// A detection ran this tick
    Live,
}
