// Host-side end-to-end tests: input sequences replayed through the frame
// driver on CPU surfaces, the way the browser loop would run them.

use sparkle_core::{
    Clock, FrameDriver, ManualClock, ParticleKind, Pixmap, Reaction, SparkleConfig,
    SparkleEngine, Surface,
};

const FRAME_MS: f64 = 1000.0 / 60.0;

struct Session {
    driver: FrameDriver<Pixmap>,
    clock: ManualClock,
}

impl Session {
    fn new(seed: u64) -> Self {
        let engine = SparkleEngine::seeded(SparkleConfig::default(), seed).unwrap();
        let mut driver = FrameDriver::new(engine, Pixmap::new(800, 600), Pixmap::new(800, 600));
        driver.resize(800.0, 600.0);
        driver.start();
        Self {
            driver,
            clock: ManualClock::default(),
        }
    }

    fn now(&self) -> f64 {
        self.clock.now_ms()
    }

    /// Run frames until `ms` more milliseconds have passed.
    fn run_for(&mut self, ms: f64) -> usize {
        let end = self.now() + ms;
        let mut spawn_events = 0;
        while self.now() + FRAME_MS <= end + 1e-9 {
            let now = self.clock.advance(FRAME_MS);
            self.driver.frame(now);
            if self.driver.stats().spawned > 0 {
                spawn_events += 1;
            }
        }
        self.clock.set(end);
        spawn_events
    }

    fn engine(&mut self) -> &mut SparkleEngine {
        self.driver.engine_mut()
    }
}

#[test]
fn quick_tap_bursts_at_release_point_with_no_orbitals() {
    let mut s = Session::new(1);
    let t0 = s.now();
    s.engine().pointer_down(420.0, 310.0, t0);
    s.run_for(50.0);
    let t1 = s.now();
    s.engine().pointer_up(420.0, 310.0, t1);
    let reaction = s.engine().click(420.0, 310.0, t1);

    let Reaction::Burst(n) = reaction else {
        panic!("expected a burst, got {reaction:?}");
    };
    assert!((40..=60).contains(&n));
    let store = s.driver.engine().store();
    assert_eq!(store.orbital_count(), 0);
    let at_release = store
        .free()
        .iter()
        .filter(|p| p.kind == ParticleKind::Burst && p.position == glam::DVec2::new(420.0, 310.0))
        .count();
    assert_eq!(at_release, n);
}

#[test]
fn three_hundred_ms_hold_spawns_repeatedly_and_release_converts_everything() {
    let mut s = Session::new(2);
    let t0 = s.now();
    s.engine().pointer_down(400.0, 300.0, t0);
    let spawn_events = s.run_for(300.0);
    assert!(spawn_events >= 2, "only {spawn_events} spawn events");

    let orbitals = s.driver.engine().store().orbital_count();
    let free = s.driver.engine().store().free_count();
    let t1 = s.now();
    assert_eq!(s.engine().pointer_up(400.0, 300.0, t1), Reaction::Dispersed(orbitals));
    assert_eq!(s.engine().click(400.0, 300.0, t1), Reaction::Nothing);

    let store = s.driver.engine().store();
    assert_eq!(store.orbital_count(), 0);
    assert_eq!(store.free_count(), free + orbitals);
}

#[test]
fn dispersed_particles_fall_away_and_expire() {
    let mut s = Session::new(3);
    let t0 = s.now();
    s.engine().pointer_down(400.0, 300.0, t0);
    s.run_for(400.0);
    let t1 = s.now();
    s.engine().pointer_up(400.0, 300.0, t1);
    s.run_for(1000.0);
    assert!(s.driver.engine().store().is_empty());
}

#[test]
fn orbit_follows_the_pointer_while_held() {
    let mut s = Session::new(4);
    let t0 = s.now();
    s.engine().pointer_down(100.0, 100.0, t0);
    s.run_for(200.0);
    let t1 = s.now();
    s.engine().pointer_move(500.0, 400.0, t1);
    s.run_for(FRAME_MS);
    for p in s.driver.engine().store().orbital() {
        assert_eq!(p.center, glam::DVec2::new(500.0, 400.0));
    }
}

#[test]
fn orbital_cap_holds_during_a_long_press() {
    let mut s = Session::new(5);
    let t0 = s.now();
    s.engine().pointer_down(400.0, 300.0, t0);
    for _ in 0..50 {
        s.run_for(100.0);
        assert!(s.driver.engine().store().orbital_count() <= 90);
    }
    assert_eq!(s.driver.engine().store().orbital_count(), 90);
}

#[test]
fn touch_tap_followed_by_ghost_click_bursts_once() {
    let mut s = Session::new(6);
    let t0 = s.now();
    s.engine().touch_start(Some((200.0, 200.0)), t0);
    s.run_for(40.0);
    let t1 = s.now();
    let first = s.engine().touch_end(Some((202.0, 201.0)), t1);
    assert!(matches!(first, Reaction::Burst(_)));
    let free = s.driver.engine().store().free_count();

    s.run_for(30.0);
    let t2 = s.now();
    assert_eq!(s.engine().pointer_down(202.0, 201.0, t2), Reaction::Ignored);
    assert_eq!(s.engine().pointer_up(202.0, 201.0, t2), Reaction::Ignored);
    assert_eq!(s.engine().click(202.0, 201.0, t2), Reaction::Ignored);
    // Only integration ran in between: nothing new was emitted.
    assert!(s.driver.engine().store().free_count() <= free);
}

#[test]
fn trail_follows_motion_and_fades() {
    let mut s = Session::new(7);
    for i in 0..30 {
        let t = s.now();
        s.engine().pointer_move(100.0 + i as f64 * 10.0, 200.0, t);
        s.run_for(FRAME_MS);
    }
    assert!(s.driver.engine().store().free_count() > 0);
    assert!(!s.driver.sparkle_surface().is_blank());
    s.run_for(1500.0);
    assert_eq!(s.driver.engine().store().free_count(), 0);
    assert!(s.driver.sparkle_surface().is_blank());
}

#[test]
fn resize_keeps_particle_state() {
    let mut s = Session::new(8);
    s.engine().burst_at(780.0, 590.0);
    s.run_for(FRAME_MS);
    let before = s.driver.engine().store().free().to_vec();

    s.driver.resize(1200.0, 800.0);
    assert_eq!(s.driver.sparkle_surface().size(), (1200.0, 800.0));
    assert_eq!(s.driver.highlight_surface().size(), (1200.0, 800.0));
    assert_eq!(s.driver.engine().store().free(), &before[..]);
}
