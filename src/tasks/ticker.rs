//! Tick scheduling for the study loop

use std::{future::Future, time::Duration};
use tokio::{
    sync::watch,
    time::{interval, Interval, MissedTickBehavior},
};
use tracing::debug;

use crate::utils::MonotonicClock;

/// Source of ticks. Each call resolves to the tick's `now_ms`, or `None` once
/// the loop should be torn down.
///
/// The loop awaits the next tick only after the previous one is fully applied,
/// so ticks never overlap.
pub trait Ticker: Send {
    fn next_tick(&mut self) -> impl Future<Output = Option<u64>> + Send;

    /// Current time on the ticker's clock
    fn now_ms(&self) -> u64;
}

/// Real-time ticker over a monotonic clock, stopped by a shutdown flag
pub struct IntervalTicker {
    clock: MonotonicClock,
    interval: Interval,
    shutdown: watch::Receiver<bool>,
}

impl IntervalTicker {
    pub fn new(clock: MonotonicClock, period: Duration, shutdown: watch::Receiver<bool>) -> Self {
        let mut interval = interval(period);
        // A slow detection call delays the schedule instead of bursting ticks
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        Self {
            clock,
            interval,
            shutdown,
        }
    }
}

impl Ticker for IntervalTicker {
    async fn next_tick(&mut self) -> Option<u64> {
        let stopped = *self.shutdown.borrow();
        if stopped {
            return None;
        }

        tokio::select! {
            _ = self.interval.tick() => Some(self.clock.now_ms()),
            _ = self.shutdown.changed() => {
                debug!("Ticker stopping (shutdown requested or sender dropped)");
                None
            }
        }
    }

    fn now_ms(&self) -> u64 {
        self.clock.now_ms()
    }
}

/// Deterministic ticker: `start, start + period, ...` for `count` ticks, without waiting
#[derive(Debug, Clone)]
pub struct FixedRateTicker {
    next_ms: u64,
    period_ms: u64,
    remaining: usize,
    last_ms: u64,
}

impl FixedRateTicker {
    pub fn new(start_ms: u64, period_ms: u64, count: usize) -> Self {
        Self {
            next_ms: start_ms,
            period_ms,
            remaining: count,
            last_ms: start_ms,
        }
    }
}

impl Ticker for FixedRateTicker {
    async fn next_tick(&mut self) -> Option<u64> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        self.last_ms = self.next_ms;
        self.next_ms += self.period_ms;
        Some(self.last_ms)
    }

    fn now_ms(&self) -> u64 {
        self.last_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fixed_rate_ticker_counts_down() {
        let mut ticker = FixedRateTicker::new(100, 50, 3);
        assert_eq!(ticker.next_tick().await, Some(100));
        assert_eq!(ticker.next_tick().await, Some(150));
        assert_eq!(ticker.next_tick().await, Some(200));
        assert_eq!(ticker.next_tick().await, None);
        assert_eq!(ticker.now_ms(), 200);
    }

    #[tokio::test(start_paused = true)]
    async fn interval_ticker_follows_clock_until_shutdown() {
        let clock = MonotonicClock::new();
        let (tx, rx) = watch::channel(false);
        let mut ticker = IntervalTicker::new(clock, Duration::from_millis(100), rx);

        assert_eq!(ticker.next_tick().await, Some(0));
        assert_eq!(ticker.next_tick().await, Some(100));

        tx.send(true).unwrap();
        assert_eq!(ticker.next_tick().await, None);
    }
}
