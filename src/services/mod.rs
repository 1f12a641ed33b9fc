//! External collaborator module
//!
//! This module contains the presence source, capture media, overlay and
//! display integrations that sit around the timer.

pub mod detector;
pub mod display;
pub mod media;
pub mod overlay;

// Re-export main types
pub use detector::{CommandDetector, Detection, DetectionMode, FaceBox, Frame, Point, PresenceSource};
pub use display::{format_elapsed, DisplaySink, DisplayUpdate, StateDisplay};
pub use media::{acquire, try_acquire, FrameInput, MediaControl, MediaStream};
pub use overlay::{LogOverlay, NoOverlay, Overlay};
