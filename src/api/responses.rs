//! API response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::state::{StatusLabel, StatusTone};

/// Current timer and presence status
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub elapsed_ms: u64,
    /// Elapsed time as `HH:MM:SS`
    pub elapsed: String,
    pub running: bool,
    pub accumulated_ms: u64,
    pub label: StatusLabel,
    pub status_text: String,
    pub tone: StatusTone,
    pub uptime: String,
    pub last_reset_time: Option<DateTime<Utc>>,
    pub timestamp: DateTime<Utc>,
}

/// API response structure for control endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControlResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl ControlResponse {
    /// Create a new control response
    pub fn new(status: &str, message: impl Into<String>) -> Self {
        Self {
            status: status.to_string(),
            message: message.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn ok(message: impl Into<String>) -> Self {
        Self::new("ok", message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new("error", message)
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
