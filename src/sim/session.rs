//! Tick scheduler
//!
//! A `Session` owns everything one game needs and exposes a single
//! `run_once(now)` entry point. Any host loop can drive it: the browser's
//! frame callback, the native harness, or a test feeding synthetic timestamps.

use super::clock::SimClock;
use super::input::{Control, InputState};
use super::state::{GameState, Snapshot};
use super::tick::tick;
use crate::tuning::Tuning;

/// Diagnostic counters for the HUD
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameStats {
    /// Ticks simulated this session
    pub frames: u64,
    /// Ticks per wall-clock second since the session started
    pub fps: Option<f64>,
}

impl FrameStats {
    /// HUD line, e.g. "120 frames, 30 fps"
    pub fn hud_text(&self) -> String {
        match self.fps {
            Some(fps) => format!("{} frames, {} fps", self.frames, fps.round()),
            None => format!("{} frames", self.frames),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Session {
    state: GameState,
    input: InputState,
    clock: SimClock,
    tuning: Tuning,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Tuning::default())
    }
}

impl Session {
    pub fn new(tuning: Tuning) -> Self {
        Self {
            state: GameState::new(),
            input: InputState::new(),
            clock: SimClock::new(tuning.tick_interval_ms(), tuning.catch_up_fraction),
            tuning,
        }
    }

    /// Feed one host frame callback. Returns true if a tick was simulated.
    pub fn run_once(&mut self, now: f64) -> bool {
        match self.clock.advance(now) {
            Some(sim_time) => {
                let controls = self.input.read_controls();
                tick(&mut self.state, &controls, sim_time, &self.tuning);
                true
            }
            None => false,
        }
    }

    /// Apply a key event. Returns false for unmapped keys.
    pub fn handle_key(&mut self, code: &str, pressed: bool) -> bool {
        self.input.handle_key(code, pressed)
    }

    pub fn set_control(&mut self, control: Control, pressed: bool) {
        self.input.set_control(control, pressed);
    }

    /// Release all controls (e.g. on window blur, where key-ups go missing)
    pub fn release_controls(&mut self) {
        self.input.clear();
    }

    pub fn snapshot(&self) -> Snapshot {
        self.state.snapshot()
    }

    pub fn frame_stats(&self, now: f64) -> FrameStats {
        FrameStats {
            frames: self.clock.ticks(),
            fps: self.clock.ticks_per_second(now),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn clock(&self) -> &SimClock {
        &self.clock
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// Start over with the same tuning
    pub fn restart(&mut self) {
        log::info!("Session restarted after {} ticks", self.clock.ticks());
        *self = Self::new(self.tuning.clone());
    }
}
