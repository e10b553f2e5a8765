//! Session stopwatch.
//!
//! The timer counts whole seconds. While it runs it owns a
//! [`tokio::time::Interval`] that yields one tick per period; every
//! delivered tick adds exactly one second. Missed ticks are skipped rather
//! than replayed, so a stalled loop never produces a burst of increments.
//!
//! Stopping drops the interval before returning, and [`Timer::apply_tick`]
//! re-checks the running flag, so a tick that was already pending when the
//! timer stopped cannot move the counter.

use std::time::Duration;
use tokio::time::{self, Instant, Interval, MissedTickBehavior};

/// Default tick period: one wall-clock second.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Debug)]
pub struct Timer {
    elapsed: u64,
    running: bool,
    period: Duration,
    schedule: Option<Interval>,
}

impl Timer {
    pub fn new(period: Duration) -> Self {
        Timer {
            elapsed: 0,
            running: false,
            period,
            schedule: None,
        }
    }

    pub fn elapsed(&self) -> u64 {
        self.elapsed
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Starts counting. Returns `false` if the timer was already running,
    /// in which case the existing schedule is kept.
    pub fn start(&mut self) -> bool {
        if self.running {
            return false;
        }
        self.running = true;
        true
    }

    /// Stops counting and cancels the pending tick. The counter is kept.
    pub fn stop(&mut self) {
        self.running = false;
        self.schedule = None;
    }

    /// Stops the timer and zeroes the counter.
    pub fn reset(&mut self) {
        self.stop();
        self.elapsed = 0;
    }

    /// Adds one second if the timer is running.
    pub fn apply_tick(&mut self) -> bool {
        if !self.running {
            return false;
        }
        self.elapsed += 1;
        true
    }

    /// Waits for the next scheduled tick.
    ///
    /// Never completes while the timer is stopped. The interval is created
    /// lazily on the first wait after a start, with its first tick one full
    /// period later.
    pub async fn next_tick(&mut self) {
        if !self.running {
            return std::future::pending().await;
        }

        let period = self.period;
        let schedule = self.schedule.get_or_insert_with(|| {
            let mut interval = time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            interval
        });
        schedule.tick().await;
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self::new(DEFAULT_TICK_INTERVAL)
    }
}
