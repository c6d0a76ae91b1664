//! Drives a whole `Session` the way a host frame loop would, with synthetic
//! timestamps instead of a browser.

use websteroids::consts::{WORLD_HEIGHT, WORLD_WIDTH};
use websteroids::sim::Control;
use websteroids::{Session, Tuning};

const FRAME_MS: f64 = 1000.0 / 60.0;

fn in_bounds(x: f32, y: f32) -> bool {
    (0.0..WORLD_WIDTH).contains(&x) && (0.0..WORLD_HEIGHT).contains(&y)
}

/// Feed 60 Hz frames from `start` for `duration` ms, checking invariants each frame
fn run_frames(session: &mut Session, start: f64, duration: f64) -> f64 {
    let mut now = start;
    while now < start + duration {
        session.run_once(now);
        let snap = session.snapshot();
        assert!(in_bounds(snap.player.x, snap.player.y), "ship out of bounds at {now}");
        assert!((0.0..std::f32::consts::TAU).contains(&snap.player.rot));
        for b in &snap.bullets {
            assert!(in_bounds(b.x, b.y), "bullet out of bounds at {now}");
        }
        now += FRAME_MS;
    }
    now
}

#[test]
fn test_sixty_hz_host_runs_about_thirty_ticks_per_second() {
    let mut session = Session::default();
    let end = run_frames(&mut session, 0.0, 2000.0);
    let ticks = session.clock().ticks();
    assert!((55..=60).contains(&ticks), "ticks = {ticks}");
    let fps = session.frame_stats(end - FRAME_MS).fps.unwrap();
    assert!((fps - 30.0).abs() < 2.0, "fps = {fps}");
}

#[test]
fn test_flying_and_firing_stays_on_the_torus() {
    let mut session = Session::default();
    session.set_control(Control::Thrust, true);
    session.set_control(Control::Fire, true);
    let now = run_frames(&mut session, 0.0, 3000.0);

    session.set_control(Control::TurnLeft, true);
    let now = run_frames(&mut session, now, 1500.0);

    let max_speed = session.tuning().max_speed_per_tick();
    assert!(session.state().player.vel.length() <= max_speed + 1e-3);

    // Coasting: no thrust, no drag
    session.set_control(Control::Thrust, false);
    session.set_control(Control::TurnLeft, false);
    let vel = session.state().player.vel;
    run_frames(&mut session, now, 3000.0);
    assert!((session.state().player.vel - vel).length() < 1e-3);
}

#[test]
fn test_held_fire_keeps_at_most_two_bullets_alive() {
    let mut session = Session::default();
    session.handle_key("Period", true);

    let mut now = 0.0;
    let mut max_alive = 0;
    while now < 5000.0 {
        session.run_once(now);
        max_alive = max_alive.max(session.state().bullets.len());
        now += FRAME_MS;
    }
    // 600ms lifespan with a shot every 333ms
    assert_eq!(max_alive, 2);

    session.handle_key("Period", false);
    run_frames(&mut session, now, 1000.0);
    assert!(session.state().bullets.is_empty());
}

#[test]
fn test_stalled_tab_runs_a_single_tick() {
    let mut session = Session::default();
    session.set_control(Control::Thrust, true);
    let now = run_frames(&mut session, 0.0, 1000.0);
    let before = session.clock().ticks();

    // Ten seconds in the background
    let resumed = now + 10_000.0;
    assert!(session.run_once(resumed));
    assert_eq!(session.clock().ticks(), before + 1);

    let interval = session.tuning().tick_interval_ms();
    let carried = resumed - session.clock().last_tick().unwrap();
    assert!(carried <= interval * 0.25 + 1e-9);

    // Normal pace afterwards
    run_frames(&mut session, resumed + FRAME_MS, 1000.0);
    let after = session.clock().ticks() - before - 1;
    assert!((28..=31).contains(&after), "after = {after}");
}

#[test]
fn test_same_inputs_same_result() {
    let script = |session: &mut Session| {
        let mut now = 0.0;
        for (code, pressed, hold_ms) in [
            ("KeyW", true, 700.0),
            ("KeyD", true, 400.0),
            ("KeyX", true, 900.0),
            ("KeyD", false, 300.0),
            ("KeyW", false, 1200.0),
        ] {
            session.handle_key(code, pressed);
            now = run_frames(session, now, hold_ms);
        }
    };

    let mut a = Session::new(Tuning::default());
    let mut b = Session::new(Tuning::default());
    script(&mut a);
    script(&mut b);

    assert_eq!(a.snapshot(), b.snapshot());
    assert_eq!(a.clock().ticks(), b.clock().ticks());
}

#[test]
fn test_backwards_timestamps_are_ignored() {
    let mut session = Session::default();
    session.set_control(Control::Thrust, true);
    let now = run_frames(&mut session, 1000.0, 500.0);
    let snap = session.snapshot();
    let ticks = session.clock().ticks();

    assert!(!session.run_once(now - 400.0));
    assert!(!session.run_once(0.0));
    assert_eq!(session.clock().ticks(), ticks);
    assert_eq!(session.snapshot(), snap);
}

#[test]
fn test_custom_frame_rate_keeps_per_second_feel() {
    let tuning = Tuning::from_json(r#"{ "frame_rate": 60.0 }"#).unwrap();
    let mut session = Session::new(tuning);
    session.set_control(Control::TurnRight, true);

    // 60 Hz host, 60 Hz sim: every frame should tick, slightly late frames included
    let mut now = 0.0;
    for _ in 0..61 {
        session.run_once(now);
        now += FRAME_MS + 0.01;
    }
    assert_eq!(session.clock().ticks(), 60);
    // Half a turn per second regardless of rate
    let rot = session.snapshot().player.rot;
    assert!((rot - std::f32::consts::PI).abs() < 1e-3, "rot = {rot}");
}

#[test]
fn test_extreme_bullet_speed_still_wraps() {
    let tuning = Tuning::from_json(r#"{ "bullet_speed": 1e12 }"#).unwrap();
    let mut session = Session::new(tuning);
    session.set_control(Control::Fire, true);

    run_frames(&mut session, 0.0, 1000.0);
    assert!(session.clock().ticks() > 0);
    assert!(!session.state().bullets.is_empty());
}
