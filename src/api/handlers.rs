//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
};
use chrono::Utc;
use tracing::{error, info};

use crate::{services::format_elapsed, state::AppState};
use super::responses::{ControlResponse, HealthResponse, StatusResponse};

/// Handle GET /status - Elapsed time computed at request time
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Result<Json<StatusResponse>, StatusCode> {
    let now_ms = state.clock.now_ms();
    let timer = match state.get_timer_state() {
        Ok(t) => t,
        Err(e) => {
            error!("Failed to get timer state: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let elapsed_ms = timer.elapsed_time(now_ms);
    let label = state.latest_display().label;

    Ok(Json(StatusResponse {
        elapsed_ms,
        elapsed: format_elapsed(elapsed_ms),
        running: timer.running,
        accumulated_ms: timer.accumulated_ms,
        label,
        status_text: label.text().to_string(),
        tone: label.tone(),
        uptime: state.get_uptime(),
        last_reset_time: state.get_last_reset(),
        timestamp: Utc::now(),
    }))
}

/// Handle POST /reset - Drop accumulated studying time
pub async fn reset_handler(State(state): State<Arc<AppState>>) -> Result<Json<ControlResponse>, StatusCode> {
    match state.reset_timer() {
        Ok(timer) => {
            info!("Reset endpoint called - timer running={}", timer.running);
            Ok(Json(ControlResponse::ok("Timer reset")))
        }
        Err(e) => {
            error!("Failed to reset timer: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /pause - Pause the capture input
pub async fn pause_handler(State(state): State<Arc<AppState>>) -> (StatusCode, Json<ControlResponse>) {
    match state.media_control() {
        Some(control) => {
            control.pause();
            info!("Pause endpoint called - capture input paused");
            (StatusCode::OK, Json(ControlResponse::ok("Capture paused")))
        }
        None => (
            StatusCode::CONFLICT,
            Json(ControlResponse::error("No capture device attached")),
        ),
    }
}

/// Handle POST /resume - Resume the capture input
pub async fn resume_handler(State(state): State<Arc<AppState>>) -> (StatusCode, Json<ControlResponse>) {
    match state.media_control() {
        Some(control) => {
            control.resume();
            info!("Resume endpoint called - capture input resumed");
            (StatusCode::OK, Json(ControlResponse::ok("Capture resumed")))
        }
        None => (
            StatusCode::CONFLICT,
            Json(ControlResponse::error("No capture device attached")),
        ),
    }
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
