//! Websteroids - a single ship on a wraparound playfield
//!
//! Core modules:
//! - `sim`: Fixed timestep simulation (clock, input, player and bullets)
//! - `tuning`: Data-driven gameplay constants
//! - `renderer`: WebGPU vector line renderer
//! - `platform`: Browser frame scheduling fallback

pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use settings::Settings;
pub use sim::Session;
pub use tuning::Tuning;

use glam::Vec2;
use std::f32::consts::TAU;

/// Game configuration constants
pub mod consts {
    use glam::Vec2;

    /// Playfield dimensions (pixels)
    pub const WORLD_WIDTH: f32 = 800.0;
    pub const WORLD_HEIGHT: f32 = 600.0;

    /// Simulation rate (ticks per second)
    pub const FRAME_RATE: f32 = 30.0;

    /// Where the ship starts each session
    pub const PLAYER_START: Vec2 = Vec2::new(WORLD_WIDTH / 2.0, WORLD_HEIGHT / 2.0);

    /// Fallback frame callback granularity when requestAnimationFrame is missing (ms)
    pub const FALLBACK_FRAME_MS: f64 = 16.0;
}

/// Rotate `v` by `theta` radians (screen coordinates, y down, so positive is clockwise)
#[inline]
pub fn rotate(v: Vec2, theta: f32) -> Vec2 {
    Vec2::from_angle(theta).rotate(v)
}

/// Component-wise offset
#[inline]
pub fn translate(v: Vec2, offset: Vec2) -> Vec2 {
    v + offset
}

#[inline]
pub fn magnitude(v: Vec2) -> f32 {
    v.length()
}

/// Scale `v` to length `target`. The zero vector stays zero.
#[inline]
pub fn normalize(v: Vec2, target: f32) -> Vec2 {
    v.normalize_or_zero() * target
}

/// Wrap a coordinate into [0, dim)
///
/// Values any distance outside the range land back in it, including ones far
/// too large for repeated add/subtract to make progress in f32. Non-finite
/// input collapses to 0. `dim` must be positive.
#[inline]
pub fn wrap(value: f32, dim: f32) -> f32 {
    if !value.is_finite() {
        return 0.0;
    }
    if (0.0..dim).contains(&value) {
        return value;
    }
    let wrapped = value.rem_euclid(dim);
    // A tiny negative value rounds up to exactly `dim`
    if wrapped >= dim { 0.0 } else { wrapped }
}

/// Wrap a position onto the toroidal playfield
#[inline]
pub fn wrap_position(pos: Vec2) -> Vec2 {
    Vec2::new(
        wrap(pos.x, consts::WORLD_WIDTH),
        wrap(pos.y, consts::WORLD_HEIGHT),
    )
}

/// Normalize a heading to [0, 2π)
#[inline]
pub fn normalize_heading(rot: f32) -> f32 {
    wrap(rot, TAU)
}
