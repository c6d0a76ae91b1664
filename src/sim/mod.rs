//! Fixed timestep simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Fixed timestep only (one tick per crossed boundary)
//! - Input is read once per tick from an explicit snapshot
//! - Stable iteration order (bullets in spawn order)
//! - No rendering or platform dependencies

pub mod clock;
pub mod input;
pub mod session;
pub mod state;
pub mod tick;

pub use clock::SimClock;
pub use input::{Control, Controls, InputState};
pub use session::{FrameStats, Session};
pub use state::{Bullet, BulletSnapshot, GameState, Player, PlayerSnapshot, Snapshot};
pub use tick::{expire_bullets, tick, update_bullets, update_player};
