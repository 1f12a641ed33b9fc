//! Error taxonomy for the presence pipeline
//!
//! None of these ever reach the timer. The sampler absorbs them and turns
//! them into samples plus a [`SourceCondition`](crate::presence::SourceCondition).

use std::path::PathBuf;

use thiserror::Error;

/// The presence source could not be brought up (models missing, detector absent)
#[derive(Debug, Error)]
pub enum InitializationError {
    #[error("failed to launch detector {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("detector readiness check failed: {0}")]
    CheckFailed(String),
}

/// A single detection call failed; recovered locally by the fallback path
#[derive(Debug, Error)]
pub enum DetectionError {
    #[error("detection command failed: {0}")]
    Failed(String),

    #[error("malformed detection output: {0}")]
    Malformed(String),

    #[error("detector io error: {0}")]
    Io(#[from] std::io::Error),
}

/// The camera could not be acquired. Sticky for the lifetime of a sampler.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MediaAccessError {
    #[error("permission denied opening {}", .0.display())]
    PermissionDenied(PathBuf),

    #[error("unsupported capture device {}: {reason}", .path.display())]
    UnsupportedDevice { path: PathBuf, reason: String },
}

/// The input exists but cannot be read right now. Treated as absence, not failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidInputState {
    #[error("input paused")]
    Paused,

    #[error("input ended")]
    Ended,
}
