//! Presence sampler: one sample per tick, whatever the detector does

use std::time::Duration;
use tracing::{debug, warn};

use crate::{
    error::MediaAccessError,
    presence::{PresenceSample, SourceCondition},
    services::{Detection, DetectionMode, Frame, FrameInput, NoOverlay, Overlay, PresenceSource},
};

/// Wraps a presence source and a frame input.
///
/// Each tick is judged on its own: a failed tick reads as absent, never as
/// the previous tick's answer.
pub struct PresenceSampler<S, I> {
    source: S,
    input: Option<I>,
    media_error: Option<MediaAccessError>,
    overlay: Box<dyn Overlay>,
    init_retry: Duration,
    next_init_attempt_ms: u64,
    condition: SourceCondition,
}

impl<S: PresenceSource, I: FrameInput> PresenceSampler<S, I> {
    pub fn new(source: S, init_retry: Duration) -> Self {
        Self {
            source,
            input: None,
            media_error: None,
            overlay: Box::new(NoOverlay),
            init_retry,
            next_init_attempt_ms: 0,
            condition: SourceCondition::AwaitingMedia,
        }
    }

    pub fn with_overlay(mut self, overlay: impl Overlay + 'static) -> Self {
        self.overlay = Box::new(overlay);
        self
    }

    /// Attach an acquired input, clearing any earlier media failure
    pub fn attach_input(&mut self, input: I) {
        self.input = Some(input);
        self.media_error = None;
    }

    /// Record a failed acquisition; reported on every tick until an input is attached
    pub fn media_failed(&mut self, error: MediaAccessError) {
        self.input = None;
        self.media_error = Some(error);
    }

    pub fn condition(&self) -> SourceCondition {
        self.condition
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Take this tick's sample. Never fails.
    pub async fn sample(&mut self, now_ms: u64) -> PresenceSample {
        if self.input.is_none() {
            self.condition = if self.media_error.is_some() {
                SourceCondition::MediaError
            } else {
                SourceCondition::AwaitingMedia
            };
            return PresenceSample::absent(now_ms);
        }

        if !self.source.is_initialized() {
            self.condition = self.try_initialize(now_ms).await;
            return PresenceSample::absent(now_ms);
        }

        let frame = match self.input.as_mut().map(I::next_frame) {
            Some(Ok(frame)) => frame,
            Some(Err(state)) => {
                debug!("Input not readable: {}", state);
                self.condition = SourceCondition::InputUnreadable(state);
                self.overlay.draw(None);
                return PresenceSample::absent(now_ms);
            }
            None => return PresenceSample::absent(now_ms),
        };

        self.condition = SourceCondition::Live;
        let detection = self.detect_with_fallback(&frame).await;
        self.overlay.draw(detection.as_ref());

        PresenceSample::from_presence(detection.is_some(), now_ms)
    }

    async fn try_initialize(&mut self, now_ms: u64) -> SourceCondition {
        if now_ms < self.next_init_attempt_ms {
            return SourceCondition::SourceLoading;
        }

        match self.source.initialize().await {
            Ok(()) => SourceCondition::SourceReady,
            Err(e) => {
                warn!("Presence source not ready, retrying in {:?}: {}", self.init_retry, e);
                let retry_ms = u64::try_from(self.init_retry.as_millis()).unwrap_or(u64::MAX);
                self.next_init_attempt_ms = now_ms.saturating_add(retry_ms);
                SourceCondition::SourceLoading
            }
        }
    }

    /// Full detection first; one box-only attempt if that errors, finds nothing
    /// or returns an unusable box
    async fn detect_with_fallback(&mut self, frame: &Frame) -> Option<Detection> {
        match self.source.detect(frame, DetectionMode::Full).await {
            Ok(Some(d)) if d.is_well_formed() => return Some(d),
            Ok(Some(_)) => debug!("Primary detection returned an unusable box, falling back"),
            Ok(None) => debug!("Primary detection found nothing, falling back"),
            Err(e) => debug!("Primary detection failed, falling back: {}", e),
        }

        match self.source.detect(frame, DetectionMode::BoxOnly).await {
            Ok(Some(d)) if d.is_well_formed() => Some(d),
            Ok(_) => None,
            Err(e) => {
                debug!("Fallback detection failed: {}", e);
                None
            }
        }
    }
}
