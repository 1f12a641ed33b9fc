//! Study Timer - a presence-gated study timer
//! 
//! This is the main entry point for the study-timer application.

use std::sync::Arc;
use tokio::{net::TcpListener, sync::watch};
use tracing::{info, warn};

use study_timer::{
    config::Config,
    state::AppState,
    api::create_router,
    presence::PresenceSampler,
    services::{try_acquire, CommandDetector, LogOverlay, StateDisplay},
    tasks::{study_loop_task, IntervalTicker},
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("study_timer={},tower_http=info", config.log_level()))
        .init();

    info!("Starting study-timer v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, detector={}, device={}, interval={}ms",
          config.host, config.port, config.detector, config.device.display(), config.interval_ms);

    // Create application state
    let state = Arc::new(AppState::new(config.port, config.host.clone()));

    // Presence sampler over the detector; the camera is optional for startup
    let detector = CommandDetector::new(config.detector.clone());
    let mut sampler = PresenceSampler::new(detector, config.init_retry());
    if config.overlay {
        sampler = sampler.with_overlay(LogOverlay);
    }

    match try_acquire(&config.device).await {
        Ok(stream) => {
            state.attach_media_control(stream.control());
            sampler.attach_input(stream);
        }
        Err(e) => {
            warn!("Continuing without camera; timer stays paused: {}", e);
            sampler.media_failed(e);
        }
    }

    // Start the study loop background task
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let ticker = IntervalTicker::new(state.clock, config.tick_interval(), shutdown_rx);
    let sink = StateDisplay::new(Arc::clone(&state));
    let study_loop = tokio::spawn(study_loop_task(Arc::clone(&state), sampler, ticker, sink));

    // Create HTTP router with all endpoints
    let app = create_router(Arc::clone(&state));

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;
    
    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  GET  /status - Elapsed studying time and status");
    info!("  POST /reset  - Reset accumulated time");
    info!("  POST /pause  - Pause the capture input");
    info!("  POST /resume - Resume the capture input");
    info!("  GET  /health - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);
    
    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    // Stop the loop at a tick boundary so the open interval is banked
    let _ = shutdown_tx.send(true);
    if let Err(e) = study_loop.await {
        tracing::error!("Study loop task failed: {}", e);
    }

    let total = state.get_timer_state().map(|t| t.accumulated_ms).unwrap_or(0);
    info!("Shutdown complete, studied {}", study_timer::services::format_elapsed(total));
    Ok(())
}
