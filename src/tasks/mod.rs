//! Background tasks module
//! 
//! This module contains the study loop that runs alongside the HTTP server
//! and the tickers that drive it.

pub mod study_loop;
pub mod ticker;

// Re-export main functions
pub use study_loop::study_loop_task;
pub use ticker::{FixedRateTicker, IntervalTicker, Ticker};
