//! Simulation clock
//!
//! Turns host frame timestamps (ms) into fixed ticks. At most one tick runs per
//! callback; leftover sub-tick time carries over to the next callback, and a
//! long stall (backgrounded tab) carries over only a fraction of a tick instead
//! of trying to catch up.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimClock {
    /// Fixed tick length (ms)
    interval_ms: f64,
    /// Carry-over kept after a stall, as a fraction of `interval_ms`
    catch_up_fraction: f64,
    /// Timestamp the last tick was accounted to (None until the first callback)
    last_tick: Option<f64>,
    /// First callback timestamp
    start_time: Option<f64>,
    /// Ticks simulated so far
    ticks: u64,
}

impl SimClock {
    pub fn new(interval_ms: f64, catch_up_fraction: f64) -> Self {
        Self {
            interval_ms,
            catch_up_fraction,
            last_tick: None,
            start_time: None,
            ticks: 0,
        }
    }

    /// Feed one host callback.
    ///
    /// Returns the simulation time of the tick to run, or None when no tick
    /// boundary was crossed. Backwards or repeated timestamps are no-ops.
    pub fn advance(&mut self, now: f64) -> Option<f64> {
        let Some(last) = self.last_tick else {
            self.last_tick = Some(now);
            self.start_time = Some(now);
            return None;
        };

        let elapsed = now - last;
        // Negated so NaN also falls through as "not yet"
        if !(elapsed >= self.interval_ms) {
            return None;
        }

        let mut excess = elapsed - self.interval_ms;
        if excess > self.interval_ms {
            log::debug!(
                "Frame callback starved for {:.0}ms, dropping catch-up",
                elapsed
            );
            excess = self.interval_ms * self.catch_up_fraction;
        }

        let tick_time = now - excess;
        self.last_tick = Some(tick_time);
        self.ticks += 1;
        Some(tick_time)
    }

    pub fn interval_ms(&self) -> f64 {
        self.interval_ms
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn last_tick(&self) -> Option<f64> {
        self.last_tick
    }

    pub fn start_time(&self) -> Option<f64> {
        self.start_time
    }

    /// Ticks per wall-clock second since the first callback
    pub fn ticks_per_second(&self, now: f64) -> Option<f64> {
        let start = self.start_time?;
        let secs = (now - start) / 1000.0;
        if secs > 0.0 {
            Some(self.ticks as f64 / secs)
        } else {
            None
        }
    }
}
