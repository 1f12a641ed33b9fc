//! Main application state management

use std::{
    sync::{Arc, Mutex},
    time::Instant,
};
use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tracing::{info, warn};

use super::{StatusLabel, TimerState, Transition};
use crate::{
    presence::PresenceSample,
    services::{format_elapsed, DisplayUpdate, MediaControl},
    utils::MonotonicClock,
};

/// Shared application state: the single owner of the timer
#[derive(Debug)]
pub struct AppState {
    /// Presence-gated timer, mutated once per tick by the study loop
    pub timer_state: Arc<Mutex<TimerState>>,
    /// Clock shared by the loop and the HTTP handlers
    pub clock: MonotonicClock,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    pub last_reset_time: Arc<Mutex<Option<DateTime<Utc>>>>,
    /// Pause switch of the attached capture stream, if any
    pub media_control: Arc<Mutex<Option<MediaControl>>>,
    /// Channel carrying the latest display update
    pub display_tx: watch::Sender<DisplayUpdate>,
    /// Keep the receiver alive to prevent channel closure
    pub _display_rx: watch::Receiver<DisplayUpdate>,
}

impl AppState {
    /// Create a new AppState with a paused, empty timer
    pub fn new(port: u16, host: String) -> Self {
        let (display_tx, display_rx) = watch::channel(DisplayUpdate {
            elapsed_ms: 0,
            label: StatusLabel::Loading,
        });

        Self {
            timer_state: Arc::new(Mutex::new(TimerState::new())),
            clock: MonotonicClock::new(),
            start_time: Instant::now(),
            port,
            host,
            last_reset_time: Arc::new(Mutex::new(None)),
            media_control: Arc::new(Mutex::new(None)),
            display_tx,
            _display_rx: display_rx,
        }
    }

    /// Feed one sample to the timer and return elapsed time at `now_ms`
    pub fn apply_sample(&self, sample: &PresenceSample, now_ms: u64) -> Result<u64, String> {
        let mut timer = self.timer_state.lock()
            .map_err(|e| format!("Failed to lock timer state: {}", e))?;

        match timer.on_sample(sample, now_ms) {
            Transition::Started => info!(
                "Presence detected, timer running from {}",
                format_elapsed(timer.accumulated_ms)
            ),
            Transition::Paused => info!(
                "Presence lost, timer paused at {}",
                format_elapsed(timer.accumulated_ms)
            ),
            Transition::Unchanged => {}
        }

        Ok(timer.elapsed_time(now_ms))
    }

    /// Bank the open interval, if any
    pub fn pause_timer(&self, now_ms: u64) -> Result<Transition, String> {
        let mut timer = self.timer_state.lock()
            .map_err(|e| format!("Failed to lock timer state: {}", e))?;

        let transition = timer.pause(now_ms);
        if transition == Transition::Paused {
            info!("Timer paused with {} banked", format_elapsed(timer.accumulated_ms));
        }
        Ok(transition)
    }

    /// Explicit external reset of the accumulated time
    pub fn reset_timer(&self) -> Result<TimerState, String> {
        let now_ms = self.clock.now_ms();
        let mut timer = self.timer_state.lock()
            .map_err(|e| format!("Failed to lock timer state: {}", e))?;

        timer.reset(now_ms);
        let snapshot = *timer;
        drop(timer);

        if let Ok(mut last_reset) = self.last_reset_time.lock() {
            *last_reset = Some(Utc::now());
        }

        info!("Timer reset");
        Ok(snapshot)
    }

    /// Get current timer state
    pub fn get_timer_state(&self) -> Result<TimerState, String> {
        self.timer_state.lock()
            .map(|state| *state)
            .map_err(|e| format!("Failed to lock timer state: {}", e))
    }

    /// Elapsed studying time right now, independent of the tick cadence
    pub fn elapsed_now(&self) -> Result<u64, String> {
        let now_ms = self.clock.now_ms();
        self.get_timer_state().map(|timer| timer.elapsed_time(now_ms))
    }

    /// Publish the latest display update to watchers
    pub fn publish_display(&self, update: DisplayUpdate) -> Result<(), String> {
        self.display_tx.send(update)
            .map_err(|e| format!("Failed to send display update: {}", e))
    }

    pub fn latest_display(&self) -> DisplayUpdate {
        *self.display_tx.borrow()
    }

    /// Remember the pause switch of an acquired stream
    pub fn attach_media_control(&self, control: MediaControl) {
        match self.media_control.lock() {
            Ok(mut slot) => *slot = Some(control),
            Err(e) => warn!("Failed to lock media control: {}", e),
        }
    }

    pub fn media_control(&self) -> Option<MediaControl> {
        self.media_control.lock().ok().and_then(|c| c.clone())
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;
        
        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    pub fn get_last_reset(&self) -> Option<DateTime<Utc>> {
        self.last_reset_time.lock().ok().and_then(|t| *t)
    }
}
