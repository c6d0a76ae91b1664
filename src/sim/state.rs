//! Game state and core simulation types

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::PLAYER_START;

/// The player's ship
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Position on the playfield (always wrapped into bounds)
    pub pos: Vec2,
    /// Heading in radians, [0, 2π). 0 points up the screen.
    pub rot: f32,
    /// Velocity (px/tick)
    pub vel: Vec2,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: PLAYER_START,
            rot: 0.0,
            vel: Vec2::ZERO,
        }
    }
}

/// A projectile
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bullet {
    pub pos: Vec2,
    /// Velocity (px/tick), frozen at spawn
    pub vel: Vec2,
    /// Simulation time (ms) at which the bullet is removed
    pub expires_at: f64,
}

impl Bullet {
    pub fn is_expired(&self, now: f64) -> bool {
        self.expires_at <= now
    }
}

/// Complete game state
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameState {
    pub player: Player,
    /// Live bullets, oldest first
    pub bullets: Vec<Bullet>,
    /// Simulation time of the last shot (None until the first one)
    pub last_fire_time: Option<f64>,
    /// Simulation tick counter
    pub time_ticks: u64,
}

impl GameState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read-only view for the renderer
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            player: PlayerSnapshot {
                x: self.player.pos.x,
                y: self.player.pos.y,
                rot: self.player.rot,
            },
            bullets: self
                .bullets
                .iter()
                .map(|b| BulletSnapshot {
                    x: b.pos.x,
                    y: b.pos.y,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub x: f32,
    pub y: f32,
    pub rot: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BulletSnapshot {
    pub x: f32,
    pub y: f32,
}

/// Everything the renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub player: PlayerSnapshot,
    /// In spawn order
    pub bullets: Vec<BulletSnapshot>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_starts_centered() {
        let state = GameState::new();
        assert_eq!(state.player.pos, Vec2::new(400.0, 300.0));
        assert_eq!(state.player.rot, 0.0);
        assert_eq!(state.player.vel, Vec2::ZERO);
        assert!(state.bullets.is_empty());
        assert_eq!(state.last_fire_time, None);
    }

    #[test]
    fn test_snapshot_keeps_bullet_order() {
        let mut state = GameState::new();
        for i in 0..3 {
            state.bullets.push(Bullet {
                pos: Vec2::new(i as f32 * 10.0, 5.0),
                vel: Vec2::ZERO,
                expires_at: 600.0,
            });
        }
        let snap = state.snapshot();
        assert_eq!(snap.player, PlayerSnapshot { x: 400.0, y: 300.0, rot: 0.0 });
        let xs: Vec<f32> = snap.bullets.iter().map(|b| b.x).collect();
        assert_eq!(xs, vec![0.0, 10.0, 20.0]);
    }

    #[test]
    fn test_bullet_expiry_boundary() {
        let b = Bullet {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            expires_at: 600.0,
        };
        assert!(!b.is_expired(599.9));
        assert!(b.is_expired(600.0));
    }
}
