//! Engine state shared by every front-end: the particle pools, the emission
//! policy and the injected random source.

use crate::config::SparkleConfig;
use crate::emitter::{self, Emitter, Reaction};
use crate::error::Result;
use crate::orbit;
use crate::particle::ParticleStore;
use crate::physics;
use glam::DVec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub struct SparkleEngine<R: Rng = StdRng> {
    config: SparkleConfig,
    store: ParticleStore,
    emitter: Emitter,
    rng: R,
}

impl SparkleEngine<StdRng> {
    /// Engine seeded from OS entropy.
    pub fn new(config: SparkleConfig) -> Result<Self> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Reproducible engine for tests and scripted replays.
    pub fn seeded(config: SparkleConfig, seed: u64) -> Result<Self> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> SparkleEngine<R> {
    pub fn with_rng(config: SparkleConfig, rng: R) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            store: ParticleStore::new(),
            emitter: Emitter::new(),
            rng,
        })
    }

    pub fn config(&self) -> &SparkleConfig {
        &self.config
    }

    pub fn store(&self) -> &ParticleStore {
        &self.store
    }

    pub fn pointer(&self) -> DVec2 {
        self.emitter.pointer()
    }

    pub fn is_pressed(&self) -> bool {
        self.emitter.is_pressed()
    }

    pub fn press_duration(&self, now_ms: f64) -> Option<f64> {
        self.emitter.press_duration(now_ms)
    }

    // ---------------- input ----------------

    pub fn pointer_move(&mut self, x: f64, y: f64, now_ms: f64) -> Reaction {
        self.emitter.on_move(
            DVec2::new(x, y),
            now_ms,
            &self.config,
            &mut self.store,
            &mut self.rng,
        )
    }

    pub fn pointer_down(&mut self, x: f64, y: f64, now_ms: f64) -> Reaction {
        self.emitter
            .on_pointer_down(DVec2::new(x, y), now_ms, &self.config)
    }

    pub fn pointer_up(&mut self, x: f64, y: f64, now_ms: f64) -> Reaction {
        self.emitter.on_pointer_up(
            DVec2::new(x, y),
            now_ms,
            &self.config,
            &mut self.store,
            &mut self.rng,
        )
    }

    pub fn click(&mut self, x: f64, y: f64, now_ms: f64) -> Reaction {
        self.emitter.on_click(
            DVec2::new(x, y),
            now_ms,
            &self.config,
            &mut self.store,
            &mut self.rng,
        )
    }

    /// `touch` is the first active touch point, `None` when the event had none.
    pub fn touch_start(&mut self, touch: Option<(f64, f64)>, now_ms: f64) -> Reaction {
        self.emitter.on_touch_start(touch.map(DVec2::from), now_ms)
    }

    pub fn touch_move(&mut self, touch: Option<(f64, f64)>, now_ms: f64) -> Reaction {
        self.emitter.on_touch_move(
            touch.map(DVec2::from),
            now_ms,
            &self.config,
            &mut self.store,
            &mut self.rng,
        )
    }

    /// `touch` is the first changed touch point of the `touchend` event.
    pub fn touch_end(&mut self, touch: Option<(f64, f64)>, now_ms: f64) -> Reaction {
        self.emitter.on_touch_end(
            touch.map(DVec2::from),
            now_ms,
            &self.config,
            &mut self.store,
            &mut self.rng,
        )
    }

    pub fn cancel_press(&mut self, now_ms: f64) -> Reaction {
        self.emitter
            .on_cancel(now_ms, &self.config, &mut self.store, &mut self.rng)
    }

    // ---------------- direct actions ----------------

    /// Explosion at an arbitrary point, bypassing input classification.
    pub fn burst_at(&mut self, x: f64, y: f64) -> usize {
        emitter::emit_burst(DVec2::new(x, y), &self.config, &mut self.store, &mut self.rng)
    }

    /// Release every orbital particle now.
    pub fn disperse(&mut self) -> usize {
        orbit::disperse(
            &mut self.store,
            self.config.orbit.dispersal_speed,
            &mut self.rng,
        )
    }

    pub fn clear(&mut self) {
        self.store.clear();
    }

    // ---------------- per frame ----------------

    pub fn spawn_orbitals(&mut self, now_ms: f64) -> usize {
        self.emitter
            .spawn_orbitals(now_ms, &self.config, &mut self.store, &mut self.rng)
    }

    /// Integrate free particles; returns how many expired this frame.
    pub fn step_free(&mut self) -> usize {
        physics::step_free(&mut self.store, &self.config.physics)
    }

    pub fn step_orbital(&mut self) {
        let center = self.emitter.pointer();
        physics::step_orbital(&mut self.store, center, &self.config.orbit, &mut self.rng);
    }

    /// Housekeeping plus both integrator passes, without rendering.
    pub fn update(&mut self, now_ms: f64) -> usize {
        self.spawn_orbitals(now_ms);
        let expired = self.step_free();
        self.step_orbital();
        expired
    }
}
