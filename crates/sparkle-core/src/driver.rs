//! Frame driver: owns the engine and both layers and runs one frame per
//! display refresh while started.
//!
//! The host supplies the cadence (requestAnimationFrame on the web, a fixed
//! step in headless replays) and calls [`FrameDriver::frame`] each tick. The
//! driver never schedules itself; a frame that returns
//! [`FrameStatus::Stopped`] tells the host to stop rescheduling.

use crate::constants::STATS_LOG_INTERVAL_FRAMES;
use crate::engine::SparkleEngine;
use crate::render::{Renderer, Surface};
use instant::Instant;
use rand::rngs::StdRng;
use rand::Rng;
use std::cell::Cell;

/// Millisecond timestamps shared by input events and frames.
pub trait Clock {
    fn now_ms(&self) -> f64;
}

/// Monotonic wall clock (performance.now() on wasm).
#[derive(Clone, Copy, Debug)]
pub struct InstantClock {
    origin: Instant,
}

impl InstantClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for InstantClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for InstantClock {
    fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

/// Hand-advanced clock for tests and scripted replays.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<f64>,
}

impl ManualClock {
    pub fn starting_at(ms: f64) -> Self {
        Self { now: Cell::new(ms) }
    }

    pub fn advance(&self, ms: f64) -> f64 {
        let next = self.now.get() + ms;
        self.now.set(next);
        next
    }

    pub fn set(&self, ms: f64) {
        self.now.set(ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> f64 {
        self.now.get()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DriverState {
    Idle,
    Running,
    Stopped,
    /// Torn down; the driver refuses to start again.
    Cancelled,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameStatus {
    Continue,
    Stopped,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub frames: u64,
    pub free: usize,
    pub orbital: usize,
    /// Free particles removed during the last frame.
    pub expired: usize,
    /// Orbital particles added during the last frame.
    pub spawned: usize,
}

pub struct FrameDriver<S: Surface, R: Rng = StdRng> {
    engine: SparkleEngine<R>,
    renderer: Renderer,
    sparkle: S,
    highlight: S,
    state: DriverState,
    stats: FrameStats,
}

impl<S: Surface, R: Rng> FrameDriver<S, R> {
    pub fn new(engine: SparkleEngine<R>, sparkle: S, highlight: S) -> Self {
        let renderer = Renderer::new(engine.config().render.clone());
        Self {
            engine,
            renderer,
            sparkle,
            highlight,
            state: DriverState::Idle,
            stats: FrameStats::default(),
        }
    }

    /// Returns false when the driver was cancelled.
    pub fn start(&mut self) -> bool {
        match self.state {
            DriverState::Cancelled => {
                log::warn!("[frame] start ignored: driver was cancelled");
                false
            }
            DriverState::Running => true,
            _ => {
                self.state = DriverState::Running;
                log::info!("[frame] driver started");
                true
            }
        }
    }

    /// Pause; particles stay where they are until the next start.
    pub fn stop(&mut self) {
        if self.state == DriverState::Running {
            self.state = DriverState::Stopped;
            log::info!("[frame] driver stopped");
        }
    }

    /// Stop for good and drop every particle and painted pixel.
    pub fn cancel(&mut self) {
        self.state = DriverState::Cancelled;
        self.engine.clear();
        self.sparkle.clear();
        self.highlight.clear();
        log::info!("[frame] driver cancelled");
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == DriverState::Running
    }

    pub fn stats(&self) -> FrameStats {
        self.stats
    }

    pub fn engine(&self) -> &SparkleEngine<R> {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut SparkleEngine<R> {
        &mut self.engine
    }

    pub fn sparkle_surface(&self) -> &S {
        &self.sparkle
    }

    pub fn highlight_surface(&self) -> &S {
        &self.highlight
    }

    /// Resize both layers. Particle coordinates are left untouched.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.sparkle.resize(width, height);
        self.highlight.resize(width, height);
        log::info!("[frame] surfaces resized to {:.0}x{:.0}", width, height);
    }

    /// One tick: orbital housekeeping, highlight layer, then update and paint
    /// free particles followed by orbital particles.
    pub fn frame(&mut self, now_ms: f64) -> FrameStatus {
        if self.state != DriverState::Running {
            return FrameStatus::Stopped;
        }

        let spawned = self.engine.spawn_orbitals(now_ms);

        self.sparkle.clear();
        let pointer = self.engine.pointer();
        self.renderer
            .draw_highlight(&mut self.highlight, pointer, self.engine.store().sprites());

        let expired = self.engine.step_free();
        self.renderer
            .draw_sparkles(&mut self.sparkle, self.engine.store().free_sprites());

        self.engine.step_orbital();
        self.renderer
            .draw_sparkles(&mut self.sparkle, self.engine.store().orbital_sprites());

        let store = self.engine.store();
        self.stats = FrameStats {
            frames: self.stats.frames + 1,
            free: store.free_count(),
            orbital: store.orbital_count(),
            expired,
            spawned,
        };
        if self.stats.frames % STATS_LOG_INTERVAL_FRAMES == 0 {
            log::debug!(
                "[frame] #{} free={} orbital={}",
                self.stats.frames,
                self.stats.free,
                self.stats.orbital
            );
        }
        FrameStatus::Continue
    }
}
