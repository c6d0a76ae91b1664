//! Data-driven gameplay constants
//!
//! Values are stored in per-second units and converted to per-tick quantities
//! for the fixed timestep, so changing `frame_rate` keeps the game feeling the
//! same.

use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

use crate::consts::FRAME_RATE;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Simulation ticks per second
    pub frame_rate: f32,
    /// Thrust acceleration (px/s²)
    pub player_accel: f32,
    /// Top speed (px/s)
    pub player_max_speed: f32,
    /// Turn rate (rad/s)
    pub turn_rate: f32,
    /// Bullet speed (px/s)
    pub bullet_speed: f32,
    /// Minimum time between shots (ms)
    pub bullet_delay_ms: f64,
    /// Time a bullet lives (ms)
    pub bullet_lifespan_ms: f64,
    /// Carry-over kept after a stalled callback, as a fraction of one tick
    pub catch_up_fraction: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            frame_rate: FRAME_RATE,
            player_accel: 400.0,
            player_max_speed: 600.0,
            turn_rate: PI, // half a turn per second
            bullet_speed: 800.0,
            bullet_delay_ms: 1000.0 / 3.0,
            bullet_lifespan_ms: 600.0,
            catch_up_fraction: 0.25,
        }
    }
}

impl Tuning {
    /// Parse tuning overrides; missing fields keep their defaults
    ///
    /// Out-of-range values (non-finite, or non-positive rates, speeds and
    /// durations) are replaced by their defaults with a warning.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let tuning: Self = serde_json::from_str(json)?;
        Ok(tuning.sanitized())
    }

    fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        positive_or_default("frame_rate", &mut self.frame_rate, defaults.frame_rate);
        positive_or_default("player_accel", &mut self.player_accel, defaults.player_accel);
        positive_or_default(
            "player_max_speed",
            &mut self.player_max_speed,
            defaults.player_max_speed,
        );
        positive_or_default("turn_rate", &mut self.turn_rate, defaults.turn_rate);
        positive_or_default("bullet_speed", &mut self.bullet_speed, defaults.bullet_speed);
        positive_or_default(
            "bullet_delay_ms",
            &mut self.bullet_delay_ms,
            defaults.bullet_delay_ms,
        );
        positive_or_default(
            "bullet_lifespan_ms",
            &mut self.bullet_lifespan_ms,
            defaults.bullet_lifespan_ms,
        );
        if !(0.0..=1.0).contains(&self.catch_up_fraction) {
            log::warn!(
                "Tuning catch_up_fraction {} outside [0, 1], using {}",
                self.catch_up_fraction,
                defaults.catch_up_fraction
            );
            self.catch_up_fraction = defaults.catch_up_fraction;
        }
        self
    }

    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "websteroids_tuning";

    /// Load tuning overrides from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let stored = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .and_then(|s| s.get_item(Self::STORAGE_KEY).ok().flatten());

        match stored {
            Some(json) => match Self::from_json(&json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning overrides: {:?}", tuning);
                    tuning
                }
                Err(e) => {
                    log::warn!("Bad tuning overrides, using defaults: {}", e);
                    Self::default()
                }
            },
            None => Self::default(),
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    /// Length of one tick (ms)
    pub fn tick_interval_ms(&self) -> f64 {
        1000.0 / self.frame_rate as f64
    }

    /// Thrust per tick (px/tick²)
    pub fn accel_per_tick(&self) -> f32 {
        self.player_accel / (self.frame_rate * self.frame_rate)
    }

    /// Speed cap per tick (px/tick)
    pub fn max_speed_per_tick(&self) -> f32 {
        self.player_max_speed / self.frame_rate
    }

    /// Heading change per tick while turning (rad/tick)
    pub fn turn_step(&self) -> f32 {
        self.turn_rate / self.frame_rate
    }

    /// Bullet displacement per tick (px/tick)
    pub fn bullet_speed_per_tick(&self) -> f32 {
        self.bullet_speed / self.frame_rate
    }
}

fn positive_or_default<T>(name: &str, value: &mut T, default: T)
where
    T: Copy + Into<f64> + std::fmt::Display,
{
    let v: f64 = (*value).into();
    if !(v.is_finite() && v > 0.0) {
        log::warn!("Tuning {} = {} is out of range, using {}", name, value, default);
        *value = default;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_per_tick_values() {
        let t = Tuning::default();
        assert!((t.tick_interval_ms() - 1000.0 / 30.0).abs() < 1e-9);
        assert!((t.accel_per_tick() - 400.0 / 900.0).abs() < 1e-6);
        assert!((t.max_speed_per_tick() - 20.0).abs() < 1e-5);
        assert!((t.turn_step() - PI / 30.0).abs() < 1e-6);
        assert!((t.bullet_speed_per_tick() - 800.0 / 30.0).abs() < 1e-4);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let t = Tuning::from_json(r#"{ "bullet_lifespan_ms": 900.0 }"#).unwrap();
        assert_eq!(t.bullet_lifespan_ms, 900.0);
        assert_eq!(t.frame_rate, FRAME_RATE);
        assert_eq!(t.player_max_speed, 600.0);
    }

    #[test]
    fn test_malformed_json_is_error() {
        assert!(Tuning::from_json("{ frame_rate: }").is_err());
    }

    #[test]
    fn test_out_of_range_values_fall_back() {
        let t = Tuning::from_json(
            r#"{ "frame_rate": 0, "bullet_speed": -5, "bullet_delay_ms": -1,
                 "catch_up_fraction": 3.0, "turn_rate": 2.0 }"#,
        )
        .unwrap();
        let d = Tuning::default();
        assert_eq!(t.frame_rate, d.frame_rate);
        assert_eq!(t.bullet_speed, d.bullet_speed);
        assert_eq!(t.bullet_delay_ms, d.bullet_delay_ms);
        assert_eq!(t.catch_up_fraction, d.catch_up_fraction);
        // Valid overrides survive alongside rejected ones
        assert_eq!(t.turn_rate, 2.0);
    }

    #[test]
    fn test_large_but_finite_values_are_kept() {
        let t = Tuning::from_json(r#"{ "bullet_speed": 1e12 }"#).unwrap();
        assert_eq!(t.bullet_speed, 1e12);
    }

    #[test]
    fn test_round_trip() {
        let t = Tuning::default();
        let json = serde_json::to_string(&t).unwrap();
        assert_eq!(Tuning::from_json(&json).unwrap(), t);
    }
}
