//! Optional detection overlay hook

use tracing::trace;

use crate::services::detector::Detection;

/// Receives detection geometry once per readable tick; `None` clears the overlay.
/// Never affects timing.
pub trait Overlay: Send {
    fn draw(&mut self, detection: Option<&Detection>);
}

/// Overlay that draws nothing
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOverlay;

impl Overlay for NoOverlay {
    fn draw(&mut self, _detection: Option<&Detection>) {}
}

/// Overlay that traces face geometry to the log
#[derive(Debug, Default, Clone, Copy)]
pub struct LogOverlay;

impl Overlay for LogOverlay {
    fn draw(&mut self, detection: Option<&Detection>) {
        match detection {
            Some(d) => trace!(
                "face box x={:.1} y={:.1} w={:.1} h={:.1} score={:.2} landmarks={}",
                d.face.x,
                d.face.y,
                d.face.width,
                d.face.height,
                d.face.score,
                d.landmarks.as_ref().map_or(0, Vec::len)
            ),
            None => trace!("overlay cleared"),
        }
    }
}
