//! Fixed timestep simulation tick
//!
//! One tick updates the player first, then the bullets, since a new bullet
//! takes the heading and position the player has after this tick's update.

use glam::Vec2;

use super::input::Controls;
use super::state::{Bullet, GameState, Player};
use crate::tuning::Tuning;
use crate::{magnitude, normalize, normalize_heading, rotate, translate, wrap_position};

/// Advance the game state by one fixed timestep at simulation time `now` (ms)
pub fn tick(state: &mut GameState, controls: &Controls, now: f64, tuning: &Tuning) {
    state.time_ticks += 1;
    update_player(&mut state.player, controls, tuning);
    update_bullets(state, controls, now, tuning);
}

/// Turn, thrust, clamp speed, move
pub fn update_player(player: &mut Player, controls: &Controls, tuning: &Tuning) {
    // Opposite turns cancel here, not at input time
    let turn = controls.turn_right as i8 - controls.turn_left as i8;
    player.rot = normalize_heading(player.rot + turn as f32 * tuning.turn_step());

    if controls.thrust {
        // Ship's nose points along local -y
        let accel = rotate(Vec2::new(0.0, -tuning.accel_per_tick()), player.rot);
        player.vel += accel;
    }

    // Strictly greater, so a zero velocity never gets here
    let max_speed = tuning.max_speed_per_tick();
    if magnitude(player.vel) > max_speed {
        player.vel = normalize(player.vel, max_speed);
    }

    player.pos = wrap_position(translate(player.pos, player.vel));
}

/// Fire (respecting the cooldown), move every bullet, then drop expired ones
pub fn update_bullets(state: &mut GameState, controls: &Controls, now: f64, tuning: &Tuning) {
    if controls.fire && cooldown_elapsed(state.last_fire_time, now, tuning.bullet_delay_ms) {
        let player = &state.player;
        let vel = rotate(Vec2::new(0.0, -tuning.bullet_speed_per_tick()), player.rot);
        state.bullets.push(Bullet {
            pos: player.pos,
            vel,
            expires_at: now + tuning.bullet_lifespan_ms,
        });
        state.last_fire_time = Some(now);
        log::trace!("Bullet fired at t={:.1}ms ({} live)", now, state.bullets.len());
    }

    for bullet in &mut state.bullets {
        bullet.pos = wrap_position(translate(bullet.pos, bullet.vel));
    }

    state.bullets = expire_bullets(&state.bullets, now);
}

/// Bullets still alive at `now`, in their original order
pub fn expire_bullets(bullets: &[Bullet], now: f64) -> Vec<Bullet> {
    bullets
        .iter()
        .filter(|b| !b.is_expired(now))
        .copied()
        .collect()
}

fn cooldown_elapsed(last_fire_time: Option<f64>, now: f64, delay_ms: f64) -> bool {
    match last_fire_time {
        None => true,
        Some(last) => now - last >= delay_ms,
    }
}
