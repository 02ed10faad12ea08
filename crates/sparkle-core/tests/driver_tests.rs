// Frame driver lifecycle, frame ordering and resize behaviour on CPU surfaces.

use sparkle_core::{
    Clock, DriverState, FrameDriver, FrameStatus, ManualClock, Pixmap, SparkleConfig,
    SparkleEngine, Surface,
};

const FRAME_MS: f64 = 1000.0 / 60.0;

fn driver(width: u32, height: u32) -> FrameDriver<Pixmap> {
    let engine = SparkleEngine::seeded(SparkleConfig::default(), 42).unwrap();
    FrameDriver::new(engine, Pixmap::new(width, height), Pixmap::new(width, height))
}

#[test]
fn frames_only_run_while_started() {
    let mut d = driver(64, 64);
    assert_eq!(d.state(), DriverState::Idle);
    assert_eq!(d.frame(0.0), FrameStatus::Stopped);
    assert_eq!(d.stats().frames, 0);

    assert!(d.start());
    assert!(d.is_running());
    assert_eq!(d.frame(0.0), FrameStatus::Continue);
    assert_eq!(d.stats().frames, 1);

    d.stop();
    assert_eq!(d.state(), DriverState::Stopped);
    assert_eq!(d.frame(FRAME_MS), FrameStatus::Stopped);
    assert_eq!(d.stats().frames, 1);

    assert!(d.start());
    assert_eq!(d.frame(2.0 * FRAME_MS), FrameStatus::Continue);
}

#[test]
fn stop_keeps_particles_where_they_are() {
    let mut d = driver(200, 200);
    d.start();
    d.engine_mut().burst_at(100.0, 100.0);
    d.frame(0.0);
    d.stop();
    let before: Vec<_> = d.engine().store().free().to_vec();
    d.frame(FRAME_MS);
    assert_eq!(d.engine().store().free(), &before[..]);
}

#[test]
fn cancelled_driver_is_empty_and_never_restarts() {
    let mut d = driver(100, 100);
    d.start();
    d.engine_mut().burst_at(50.0, 50.0);
    d.engine_mut().pointer_down(50.0, 50.0, 0.0);
    d.frame(150.0);
    assert!(!d.sparkle_surface().is_blank());

    d.cancel();
    assert_eq!(d.state(), DriverState::Cancelled);
    assert!(d.engine().store().is_empty());
    assert!(d.sparkle_surface().is_blank());
    assert!(d.highlight_surface().is_blank());
    assert!(!d.start());
    assert_eq!(d.frame(200.0), FrameStatus::Stopped);
}

#[test]
fn frame_spawns_orbitals_and_reports_stats() {
    let mut d = driver(300, 300);
    d.start();
    d.engine_mut().pointer_down(150.0, 150.0, 0.0);
    let clock = ManualClock::default();
    let mut spawned = 0;
    for _ in 0..12 {
        clock.advance(FRAME_MS);
        d.frame(clock.now_ms());
        spawned += d.stats().spawned;
    }
    let stats = d.stats();
    assert_eq!(stats.frames, 12);
    assert!(spawned > 0);
    assert_eq!(stats.orbital, d.engine().store().orbital_count());
    assert_eq!(stats.orbital, spawned);
}

#[test]
fn highlight_layer_always_shows_the_cursor_glow() {
    let mut d = driver(100, 100);
    d.start();
    d.engine_mut().pointer_move(50.0, 50.0, 0.0);
    d.engine_mut().clear();
    d.frame(0.0);
    assert!(d.engine().store().is_empty());
    assert!(d.sparkle_surface().is_blank());
    assert!(d.highlight_surface().pixel(50, 50).unwrap()[3] > 0.0);
}

#[test]
fn free_particles_expire_through_frames() {
    let mut d = driver(400, 400);
    d.start();
    let n = d.engine_mut().burst_at(200.0, 200.0);
    let mut expired = 0;
    for i in 0..60 {
        d.frame(i as f64 * FRAME_MS);
        expired += d.stats().expired;
    }
    assert_eq!(expired, n);
    assert_eq!(d.engine().store().free_count(), 0);
}

#[test]
fn resize_changes_both_surfaces_and_leaves_particles_alone() {
    let mut d = driver(800, 600);
    d.resize(800.0, 600.0);
    d.start();
    d.engine_mut().burst_at(700.0, 500.0);
    d.engine_mut().pointer_down(400.0, 300.0, 0.0);
    d.frame(200.0);

    let free = d.engine().store().free().to_vec();
    let orbital = d.engine().store().orbital().to_vec();
    assert!(!orbital.is_empty());

    d.resize(1200.0, 800.0);
    assert_eq!(d.sparkle_surface().size(), (1200.0, 800.0));
    assert_eq!(d.highlight_surface().size(), (1200.0, 800.0));
    assert_eq!(d.engine().store().free(), &free[..]);
    assert_eq!(d.engine().store().orbital(), &orbital[..]);

    // Idempotent.
    d.resize(1200.0, 800.0);
    assert_eq!(d.sparkle_surface().size(), (1200.0, 800.0));
    assert_eq!(d.frame(220.0), FrameStatus::Continue);
}

#[test]
fn manual_clock_moves_only_when_told() {
    let clock = ManualClock::starting_at(10.0);
    assert_eq!(clock.now_ms(), 10.0);
    assert_eq!(clock.advance(5.0), 15.0);
    clock.set(100.0);
    assert_eq!(clock.now_ms(), 100.0);
}
