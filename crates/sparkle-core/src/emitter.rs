//! Emission policy: turns pointer and touch events into new particles.
//!
//! The emitter owns the pointer state (position, press timing, touch origin)
//! and only ever appends to the store; the single exception is a release,
//! which hands the orbital pool to [`crate::orbit::disperse`].

use crate::config::{jitter, SparkleConfig};
use crate::orbit;
use crate::particle::{FreeParticle, OrbitalParticle, ParticleKind, ParticleStore};
use glam::DVec2;
use rand::Rng;
use std::f64::consts::TAU;

/// What an input event did to the particle store.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Reaction {
    /// State updated, nothing emitted.
    Nothing,
    /// Event dropped without touching any state.
    Ignored,
    Trail(usize),
    Burst(usize),
    Dispersed(usize),
}

/// A finished mouse press, waiting for the click that usually follows.
#[derive(Clone, Copy, Debug)]
struct Release {
    held_ms: f64,
    at_ms: f64,
}

#[derive(Clone, Debug, Default)]
pub struct Emitter {
    pointer: DVec2,
    pressed: bool,
    press_started_ms: f64,
    last_release: Option<Release>,
    last_trail_ms: Option<f64>,
    last_orbit_spawn_ms: f64,
    touch_origin: DVec2,
    last_touch_end_ms: Option<f64>,
}

impl Emitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pointer(&self) -> DVec2 {
        self.pointer
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// How long the current press has lasted, if one is in progress.
    pub fn press_duration(&self, now_ms: f64) -> Option<f64> {
        self.pressed
            .then(|| (now_ms - self.press_started_ms).max(0.0))
    }

    pub fn on_move<R: Rng>(
        &mut self,
        at: DVec2,
        now_ms: f64,
        cfg: &SparkleConfig,
        store: &mut ParticleStore,
        rng: &mut R,
    ) -> Reaction {
        self.pointer = at;
        let due = self
            .last_trail_ms
            .map_or(true, |t| now_ms - t > cfg.trail.interval_ms);
        if !due {
            return Reaction::Nothing;
        }
        self.last_trail_ms = Some(now_ms);
        Reaction::Trail(emit_trail(at, cfg, store, rng))
    }

    pub fn on_pointer_down(&mut self, at: DVec2, now_ms: f64, cfg: &SparkleConfig) -> Reaction {
        if self.is_ghost(now_ms, cfg) {
            return Reaction::Ignored;
        }
        self.begin_press(at, now_ms);
        Reaction::Nothing
    }

    pub fn on_pointer_up<R: Rng>(
        &mut self,
        at: DVec2,
        now_ms: f64,
        cfg: &SparkleConfig,
        store: &mut ParticleStore,
        rng: &mut R,
    ) -> Reaction {
        if self.is_ghost(now_ms, cfg) {
            return Reaction::Ignored;
        }
        self.pointer = at;
        if !self.pressed {
            return Reaction::Nothing;
        }
        let held = self.end_press(now_ms);
        if held >= cfg.hold_threshold_ms && store.orbital_count() > 0 {
            return Reaction::Dispersed(orbit::disperse(store, cfg.orbit.dispersal_speed, rng));
        }
        Reaction::Nothing
    }

    /// Clicks arrive right after down/up; only a short press explodes. A click
    /// with no press released within the click window (keyboard activation,
    /// synthetic events, a release the page never saw) counts as short.
    pub fn on_click<R: Rng>(
        &mut self,
        at: DVec2,
        now_ms: f64,
        cfg: &SparkleConfig,
        store: &mut ParticleStore,
        rng: &mut R,
    ) -> Reaction {
        if self.is_ghost(now_ms, cfg) {
            return Reaction::Ignored;
        }
        self.pointer = at;
        let held = self
            .last_release
            .take()
            .filter(|r| now_ms - r.at_ms <= cfg.click_window_ms)
            .map_or(0.0, |r| r.held_ms);
        if held < cfg.hold_threshold_ms {
            Reaction::Burst(emit_burst(at, cfg, store, rng))
        } else {
            Reaction::Nothing
        }
    }

    pub fn on_touch_start(&mut self, touch: Option<DVec2>, now_ms: f64) -> Reaction {
        let Some(at) = touch else {
            return Reaction::Ignored;
        };
        self.begin_press(at, now_ms);
        self.touch_origin = at;
        Reaction::Nothing
    }

    pub fn on_touch_move<R: Rng>(
        &mut self,
        touch: Option<DVec2>,
        now_ms: f64,
        cfg: &SparkleConfig,
        store: &mut ParticleStore,
        rng: &mut R,
    ) -> Reaction {
        match touch {
            Some(at) => self.on_move(at, now_ms, cfg, store, rng),
            None => Reaction::Ignored,
        }
    }

    /// Short, stationary touches explode; any other release disperses the
    /// orbit if one has built up.
    pub fn on_touch_end<R: Rng>(
        &mut self,
        touch: Option<DVec2>,
        now_ms: f64,
        cfg: &SparkleConfig,
        store: &mut ParticleStore,
        rng: &mut R,
    ) -> Reaction {
        let Some(at) = touch else {
            return Reaction::Ignored;
        };
        self.pointer = at;
        let travelled = at.distance(self.touch_origin);
        let held = if self.pressed {
            self.end_press(now_ms)
        } else {
            0.0
        };
        // Touch releases never feed click classification.
        self.last_release = None;
        self.last_touch_end_ms = Some(now_ms);

        if travelled < cfg.tap_threshold_px && held < cfg.hold_threshold_ms {
            Reaction::Burst(emit_burst(at, cfg, store, rng))
        } else if store.orbital_count() > 0 {
            Reaction::Dispersed(orbit::disperse(store, cfg.orbit.dispersal_speed, rng))
        } else {
            Reaction::Nothing
        }
    }

    /// Abort a press (touch cancelled, window lost focus) without exploding.
    pub fn on_cancel<R: Rng>(
        &mut self,
        now_ms: f64,
        cfg: &SparkleConfig,
        store: &mut ParticleStore,
        rng: &mut R,
    ) -> Reaction {
        if !self.pressed {
            return Reaction::Nothing;
        }
        self.end_press(now_ms);
        self.last_release = None;
        if store.orbital_count() > 0 {
            Reaction::Dispersed(orbit::disperse(store, cfg.orbit.dispersal_speed, rng))
        } else {
            Reaction::Nothing
        }
    }

    /// Per-frame housekeeping: add a batch of orbital particles when the
    /// press is past the hold threshold and the spawn interval has elapsed.
    /// At the cap the batch is skipped, not queued.
    pub fn spawn_orbitals<R: Rng>(
        &mut self,
        now_ms: f64,
        cfg: &SparkleConfig,
        store: &mut ParticleStore,
        rng: &mut R,
    ) -> usize {
        if !self.pressed || now_ms - self.press_started_ms < cfg.hold_threshold_ms {
            return 0;
        }
        let orbit = &cfg.orbit;
        if now_ms - self.last_orbit_spawn_ms < orbit.spawn_interval_ms {
            return 0;
        }
        let room = orbit.max_particles.saturating_sub(store.orbital_count());
        if room == 0 {
            return 0;
        }
        let count = rng.gen_range(orbit.spawn_min..=orbit.spawn_max).min(room);
        for _ in 0..count {
            store.push_orbital(spawn_orbital(self.pointer, cfg, rng));
        }
        self.last_orbit_spawn_ms = now_ms;
        count
    }

    fn begin_press(&mut self, at: DVec2, now_ms: f64) {
        self.pointer = at;
        self.pressed = true;
        self.press_started_ms = now_ms;
        self.last_orbit_spawn_ms = now_ms;
        self.last_release = None;
    }

    fn end_press(&mut self, now_ms: f64) -> f64 {
        let held = (now_ms - self.press_started_ms).max(0.0);
        self.pressed = false;
        self.last_release = Some(Release {
            held_ms: held,
            at_ms: now_ms,
        });
        held
    }

    fn is_ghost(&self, now_ms: f64, cfg: &SparkleConfig) -> bool {
        self.last_touch_end_ms
            .map_or(false, |t| now_ms - t < cfg.ghost_click_window_ms)
    }
}

/// Emit one trail batch at `at`, returning the number of particles added.
pub fn emit_trail<R: Rng>(
    at: DVec2,
    cfg: &SparkleConfig,
    store: &mut ParticleStore,
    rng: &mut R,
) -> usize {
    let trail = &cfg.trail;
    for _ in 0..trail.per_emit {
        let offset = DVec2::new(
            jitter(rng, trail.position_jitter),
            jitter(rng, trail.position_jitter),
        );
        let velocity = DVec2::new(jitter(rng, trail.speed_max), jitter(rng, trail.speed_max));
        let size = trail.size.sample(rng);
        let hue = cfg.base_hue + jitter(rng, trail.hue_jitter);
        store.push_free(FreeParticle::new(
            ParticleKind::Trail,
            at + offset,
            velocity,
            size,
            hue,
        ));
    }
    trail.per_emit
}

/// Radial explosion: evenly spaced headings with a little jitter and an
/// upward pop on each particle.
pub fn emit_burst<R: Rng>(
    at: DVec2,
    cfg: &SparkleConfig,
    store: &mut ParticleStore,
    rng: &mut R,
) -> usize {
    let burst = &cfg.burst;
    let count = rng.gen_range(burst.count_min..=burst.count_max);
    store.reserve_free(count);
    for i in 0..count {
        let angle = TAU * i as f64 / count as f64 + jitter(rng, burst.angle_jitter);
        let speed = burst.speed.sample(rng);
        let mut velocity = DVec2::new(angle.cos(), angle.sin()) * speed;
        velocity.y -= burst.pop.sample(rng);
        let size = burst.size.sample(rng);
        let hue = cfg.base_hue + jitter(rng, burst.hue_jitter);
        store.push_free(FreeParticle::new(
            ParticleKind::Burst,
            at,
            velocity,
            size,
            hue,
        ));
    }
    count
}

/// New orbital particle around `center`. Spin scales with `1/sqrt(r0)` so
/// wide orbits start slower.
pub fn spawn_orbital<R: Rng>(center: DVec2, cfg: &SparkleConfig, rng: &mut R) -> OrbitalParticle {
    let orbit = &cfg.orbit;
    let radius = orbit.start_radius.sample(rng).max(orbit.stable_radius + f64::EPSILON);
    OrbitalParticle {
        angle: rng.gen_range(0.0..TAU),
        radius,
        angular_velocity: orbit.spin_gain / radius.sqrt(),
        spiral_speed: orbit.radius_decay,
        center,
        life: 1.0,
        size: orbit.size.sample(rng),
        hue: cfg.base_hue + jitter(rng, orbit.hue_jitter),
    }
}
