//! State management module
//! 
//! This module contains the presence-gated timer, status labels and the
//! shared application state that owns them.

pub mod app_state;
pub mod status;
pub mod timer_state;

// Re-export main types
pub use app_state::AppState;
pub use status::{status_label, StatusLabel, StatusTone};
pub use timer_state::{TimerState, Transition};
