//! Study loop background task

use std::sync::Arc;
use tracing::{debug, error, info};

use crate::{
    presence::PresenceSampler,
    services::{DisplaySink, FrameInput, PresenceSource},
    state::{status_label, AppState},
    tasks::Ticker,
};

/// Background task that samples presence once per tick, gates the timer on it
/// and pushes the result to the display.
///
/// Runs until the ticker ends; the open interval is banked on the way out.
pub async fn study_loop_task<S, I, T, D>(
    state: Arc<AppState>,
    mut sampler: PresenceSampler<S, I>,
    mut ticker: T,
    mut sink: D,
) where
    S: PresenceSource,
    I: FrameInput,
    T: Ticker,
    D: DisplaySink,
{
    info!("Starting study loop");

    let mut ticks: u64 = 0;
    while let Some(now_ms) = ticker.next_tick().await {
        ticks += 1;

        let sample = sampler.sample(now_ms).await;
        let label = status_label(&sample, sampler.condition());

        let elapsed_ms = match state.apply_sample(&sample, now_ms) {
            Ok(elapsed) => elapsed,
            Err(e) => {
                // Keep ticking; the display falls back to the last published value
                error!("Failed to apply presence sample: {}", e);
                state.latest_display().elapsed_ms
            }
        };

        debug!(
            "Tick {} at {}ms: present={} condition={:?}",
            ticks, now_ms, sample.present, sampler.condition()
        );
        sink.render(elapsed_ms, label);
    }

    let now_ms = ticker.now_ms();
    if let Err(e) = state.pause_timer(now_ms) {
        error!("Failed to pause timer on teardown: {}", e);
    }
    info!("Study loop stopped after {} ticks", ticks);
}
