//! Display sinks for elapsed time and status

use std::sync::Arc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::state::{AppState, StatusLabel};

/// Latest value pushed to the display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayUpdate {
    pub elapsed_ms: u64,
    pub label: StatusLabel,
}

/// Anything that can show elapsed time and a status label. Fire-and-forget.
pub trait DisplaySink: Send {
    fn render(&mut self, elapsed_ms: u64, label: StatusLabel);
}

impl<D: DisplaySink + ?Sized> DisplaySink for &mut D {
    fn render(&mut self, elapsed_ms: u64, label: StatusLabel) {
        (**self).render(elapsed_ms, label);
    }
}

/// Sink that publishes into the shared application state
pub struct StateDisplay {
    state: Arc<AppState>,
    last_label: Option<StatusLabel>,
}

impl StateDisplay {
    pub fn new(state: Arc<AppState>) -> Self {
        Self {
            state,
            last_label: None,
        }
    }
}

impl DisplaySink for StateDisplay {
    fn render(&mut self, elapsed_ms: u64, label: StatusLabel) {
        if self.last_label != Some(label) {
            info!("Status: {} ({})", label, format_elapsed(elapsed_ms));
            self.last_label = Some(label);
        } else {
            debug!("Display update: {} {}", format_elapsed(elapsed_ms), label);
        }

        if let Err(e) = self.state.publish_display(DisplayUpdate { elapsed_ms, label }) {
            warn!("Failed to publish display update: {}", e);
        }
    }
}

/// Format milliseconds as `HH:MM:SS`, flooring to whole seconds
pub fn format_elapsed(elapsed_ms: u64) -> String {
    let total_seconds = elapsed_ms / 1000;
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}
