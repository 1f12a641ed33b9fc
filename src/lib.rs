//! Study Timer - counts studying time only while a face is in front of the camera
//! 
//! This library provides the presence-gated timer, the sampler that turns a
//! failure-prone face detector into one clean sample per tick, and the loop
//! and HTTP surface around them.

pub mod config;
pub mod error;
pub mod state;
pub mod presence;
pub mod api;
pub mod services;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use state::{AppState, StatusLabel, TimerState};
pub use presence::{PresenceSample, PresenceSampler};
pub use api::create_router;
pub use tasks::study_loop_task;
pub use utils::signals::shutdown_signal;
