// Input classification and emission, driven through the engine API.

use sparkle_core::{ParticleKind, Reaction, SparkleConfig, SparkleEngine, SparkleError};

const FRAME_MS: f64 = 1000.0 / 60.0;

fn engine(seed: u64) -> SparkleEngine {
    SparkleEngine::seeded(SparkleConfig::default(), seed).unwrap()
}

/// Run housekeeping and both integrators on a 60 fps cadence from `from`
/// (exclusive) to `to` (inclusive). Returns how many spawn batches happened.
fn run_frames(engine: &mut SparkleEngine, from: f64, to: f64) -> usize {
    let mut batches = 0;
    let mut now = from + FRAME_MS;
    while now <= to {
        if engine.spawn_orbitals(now) > 0 {
            batches += 1;
        }
        engine.step_free();
        engine.step_orbital();
        now += FRAME_MS;
    }
    batches
}

#[test]
fn trail_respects_the_emission_interval() {
    let mut e = engine(1);
    assert_eq!(e.pointer_move(10.0, 10.0, 0.0), Reaction::Trail(3));
    assert_eq!(e.pointer_move(12.0, 10.0, 5.0), Reaction::Nothing);
    // Strictly more than 8 ms must have passed.
    assert_eq!(e.pointer_move(14.0, 10.0, 8.0), Reaction::Nothing);
    assert_eq!(e.pointer_move(16.0, 10.0, 9.0), Reaction::Trail(3));
    assert_eq!(e.store().free_count(), 6);
    assert_eq!(e.pointer(), glam::DVec2::new(16.0, 10.0));
}

#[test]
fn trail_particles_are_jittered_gold_sparks() {
    let mut e = engine(4);
    let cfg = SparkleConfig::default();
    e.pointer_move(200.0, 150.0, 0.0);
    for p in e.store().free() {
        assert_eq!(p.kind, ParticleKind::Trail);
        assert!((p.position.x - 200.0).abs() <= cfg.trail.position_jitter);
        assert!((p.position.y - 150.0).abs() <= cfg.trail.position_jitter);
        assert!(p.velocity.x.abs() <= cfg.trail.speed_max);
        assert!(cfg.trail.size.contains(p.size));
        assert!((p.hue - cfg.base_hue).abs() <= cfg.trail.hue_jitter);
        assert_eq!(p.life, 1.0);
    }
}

#[test]
fn quick_click_bursts_at_the_release_point() {
    let mut e = engine(7);
    assert_eq!(e.pointer_down(300.0, 200.0, 0.0), Reaction::Nothing);
    assert_eq!(e.pointer_up(300.0, 200.0, 50.0), Reaction::Nothing);
    let Reaction::Burst(n) = e.click(300.0, 200.0, 50.0) else {
        panic!("expected a burst");
    };
    assert!((40..=60).contains(&n));
    assert_eq!(e.store().free_count(), n);
    assert_eq!(e.store().orbital_count(), 0);
    for p in e.store().free() {
        assert_eq!(p.kind, ParticleKind::Burst);
        assert_eq!(p.position, glam::DVec2::new(300.0, 200.0));
    }
}

#[test]
fn burst_speeds_stay_within_the_configured_range() {
    let mut e = engine(8);
    let cfg = SparkleConfig::default();
    e.burst_at(0.0, 0.0);
    let max = cfg.burst.speed.max + cfg.burst.pop.max;
    for p in e.store().free() {
        assert!(p.velocity.length() <= max + 1e-9);
        assert!(cfg.burst.size.contains(p.size));
    }
}

#[test]
fn click_without_a_recorded_press_counts_as_short() {
    let mut e = engine(3);
    assert!(matches!(e.click(5.0, 5.0, 0.0), Reaction::Burst(_)));
}

#[test]
fn long_press_release_does_not_swallow_a_much_later_click() {
    let mut e = engine(3);
    e.pointer_down(5.0, 5.0, 0.0);
    e.pointer_up(5.0, 5.0, 500.0);
    // No click followed the release; a keyboard click seconds later is short.
    assert!(matches!(e.click(5.0, 5.0, 5000.0), Reaction::Burst(_)));
}

#[test]
fn click_inside_the_window_after_a_long_press_stays_quiet() {
    let mut e = engine(3);
    let window = SparkleConfig::default().click_window_ms;
    e.pointer_down(5.0, 5.0, 0.0);
    e.pointer_up(5.0, 5.0, 500.0);
    assert_eq!(e.click(5.0, 5.0, 500.0 + window), Reaction::Nothing);
}

#[test]
fn new_press_forgets_the_previous_release() {
    let mut e = engine(3);
    e.pointer_down(5.0, 5.0, 0.0);
    e.pointer_up(5.0, 5.0, 500.0);
    // Second press whose mouseup never reached the page.
    e.pointer_down(5.0, 5.0, 520.0);
    assert!(matches!(e.click(5.0, 5.0, 560.0), Reaction::Burst(_)));
}

#[test]
fn no_orbitals_before_the_hold_threshold() {
    let mut e = engine(2);
    e.pointer_down(0.0, 0.0, 0.0);
    assert_eq!(e.spawn_orbitals(60.0), 0);
    assert_eq!(e.spawn_orbitals(99.0), 0);
    assert_eq!(e.store().orbital_count(), 0);
    assert!(e.spawn_orbitals(100.0) >= 2);
}

#[test]
fn held_press_spawns_batches_and_release_disperses_them_all() {
    let mut e = engine(21);
    e.pointer_down(400.0, 300.0, 0.0);
    let batches = run_frames(&mut e, 0.0, 300.0);
    assert!(batches >= 2, "only {batches} spawn batches");

    let orbitals = e.store().orbital_count();
    let free_before = e.store().free_count();
    assert!(orbitals > 0);

    assert_eq!(e.pointer_up(400.0, 300.0, 300.0), Reaction::Dispersed(orbitals));
    assert_eq!(e.store().orbital_count(), 0);
    assert_eq!(e.store().free_count(), free_before + orbitals);
    // The click that follows a hold must not explode.
    assert_eq!(e.click(400.0, 300.0, 300.0), Reaction::Nothing);
    assert!(e
        .store()
        .free()
        .iter()
        .all(|p| p.kind == ParticleKind::Dispersed));
}

#[test]
fn orbital_pool_is_capped_however_often_spawning_is_attempted() {
    let mut e = engine(13);
    let cap = SparkleConfig::default().orbit.max_particles;
    e.pointer_down(0.0, 0.0, 0.0);
    let mut now = 100.0;
    for _ in 0..500 {
        e.spawn_orbitals(now);
        assert!(e.store().orbital_count() <= cap);
        now += 1.0;
    }
    for _ in 0..200 {
        e.spawn_orbitals(now);
        assert!(e.store().orbital_count() <= cap);
        now += 50.0;
    }
    assert_eq!(e.store().orbital_count(), cap);
    assert_eq!(e.spawn_orbitals(now + 50.0), 0);
}

#[test]
fn spawn_batches_wait_for_the_interval() {
    let mut e = engine(17);
    e.pointer_down(0.0, 0.0, 0.0);
    assert!(e.spawn_orbitals(100.0) > 0);
    assert_eq!(e.spawn_orbitals(120.0), 0);
    assert_eq!(e.spawn_orbitals(149.0), 0);
    assert!(e.spawn_orbitals(150.0) > 0);
}

#[test]
fn releasing_after_a_hold_without_orbitals_does_nothing() {
    let mut e = engine(5);
    e.pointer_down(0.0, 0.0, 0.0);
    assert_eq!(e.pointer_up(0.0, 0.0, 500.0), Reaction::Nothing);
    assert!(!e.is_pressed());
    assert!(e.store().is_empty());
}

#[test]
fn touch_tap_bursts_once_and_ghost_mouse_events_are_ignored() {
    let mut e = engine(31);
    assert_eq!(e.touch_start(Some((100.0, 100.0)), 0.0), Reaction::Nothing);
    let Reaction::Burst(n) = e.touch_end(Some((103.0, 104.0)), 60.0) else {
        panic!("expected a tap burst");
    };
    assert_eq!(e.store().free_count(), n);

    assert_eq!(e.pointer_down(103.0, 104.0, 80.0), Reaction::Ignored);
    assert_eq!(e.pointer_up(103.0, 104.0, 90.0), Reaction::Ignored);
    assert_eq!(e.click(103.0, 104.0, 100.0), Reaction::Ignored);
    assert_eq!(e.store().free_count(), n);
    assert!(!e.is_pressed());

    // Well after the window, mouse input counts again.
    assert!(matches!(e.click(0.0, 0.0, 1000.0), Reaction::Burst(_)));
}

#[test]
fn touch_swipe_without_orbitals_emits_nothing_on_release() {
    let mut e = engine(6);
    e.touch_start(Some((0.0, 0.0)), 0.0);
    e.touch_move(Some((30.0, 0.0)), 20.0);
    let before = e.store().free_count();
    assert_eq!(e.touch_end(Some((60.0, 0.0)), 50.0), Reaction::Nothing);
    assert_eq!(e.store().free_count(), before);
}

#[test]
fn long_stationary_touch_disperses_instead_of_bursting() {
    let mut e = engine(8);
    e.touch_start(Some((50.0, 50.0)), 0.0);
    let batches = run_frames(&mut e, 0.0, 400.0);
    assert!(batches > 0);
    let orbitals = e.store().orbital_count();
    assert_eq!(e.touch_end(Some((50.0, 50.0)), 400.0), Reaction::Dispersed(orbitals));
    assert_eq!(e.store().orbital_count(), 0);
}

#[test]
fn touch_events_without_a_point_change_nothing() {
    let mut e = engine(1);
    assert_eq!(e.touch_start(None, 0.0), Reaction::Ignored);
    assert!(!e.is_pressed());
    assert_eq!(e.touch_move(None, 10.0), Reaction::Ignored);
    assert_eq!(e.touch_end(None, 20.0), Reaction::Ignored);
    assert!(e.store().is_empty());
    // No touch end was recorded, so mouse input is not suppressed.
    assert_eq!(e.pointer_down(0.0, 0.0, 30.0), Reaction::Nothing);
}

#[test]
fn cancelled_press_disperses_without_a_burst() {
    let mut e = engine(12);
    e.pointer_down(10.0, 10.0, 0.0);
    run_frames(&mut e, 0.0, 250.0);
    let orbitals = e.store().orbital_count();
    assert!(orbitals > 0);
    assert_eq!(e.cancel_press(250.0), Reaction::Dispersed(orbitals));
    assert!(!e.is_pressed());
    assert!(e
        .store()
        .free()
        .iter()
        .all(|p| p.kind != ParticleKind::Burst));
    assert_eq!(e.cancel_press(260.0), Reaction::Nothing);
}

#[test]
fn press_duration_is_reported_only_while_pressed() {
    let mut e = engine(1);
    assert_eq!(e.press_duration(10.0), None);
    e.pointer_down(0.0, 0.0, 10.0);
    assert_eq!(e.press_duration(110.0), Some(100.0));
    e.pointer_up(0.0, 0.0, 120.0);
    assert_eq!(e.press_duration(130.0), None);
}

#[test]
fn invalid_configurations_are_rejected() {
    let mut cfg = SparkleConfig::default();
    cfg.orbit.stable_radius = 90.0;
    assert!(matches!(
        SparkleEngine::seeded(cfg, 0),
        Err(SparkleError::OrbitInsideStableRadius { .. })
    ));

    let mut cfg = SparkleConfig::default();
    cfg.burst.count_min = 70;
    assert!(matches!(
        SparkleEngine::seeded(cfg, 0),
        Err(SparkleError::InvalidCount { name: "burst", .. })
    ));

    let mut cfg = SparkleConfig::default();
    cfg.orbit.max_particles = 0;
    assert_eq!(cfg.validate(), Err(SparkleError::ZeroOrbitCap));

    let mut cfg = SparkleConfig::default();
    cfg.trail.size = sparkle_core::Span::new(4.0, 1.0);
    assert!(matches!(cfg.validate(), Err(SparkleError::InvertedRange { .. })));

    let mut cfg = SparkleConfig::default();
    cfg.click_window_ms = 0.0;
    assert!(matches!(
        cfg.validate(),
        Err(SparkleError::NonPositive { name: "click window", .. })
    ));

    assert_eq!(SparkleConfig::default().validate(), Ok(()));
}
