//! Presence sampling module
//!
//! Turns the raw, failure-prone detector into one well-formed sample per tick.

pub mod sample;
pub mod sampler;

// Re-export main types
pub use sample::{PresenceSample, SourceCondition};
pub use sampler::PresenceSampler;
