//! Cursor-following sparkle trail engine.
//!
//! Pointer motion leaves a fading trail of gold particles, a tap explodes into
//! a radial burst, and a press held past the hold threshold gathers particles
//! into decaying orbits around the pointer that are flung outward on release.
//! Everything here is platform-free: front-ends feed input events and frame
//! ticks into a [`FrameDriver`] and provide [`Surface`] implementations for the
//! two layers.

pub mod color;
pub mod config;
pub mod constants;
pub mod driver;
pub mod emitter;
pub mod engine;
pub mod error;
pub mod orbit;
pub mod particle;
pub mod physics;
pub mod raster;
pub mod render;

pub use color::Color;
pub use config::{Span, SparkleConfig};
pub use driver::{Clock, DriverState, FrameDriver, FrameStats, FrameStatus, InstantClock, ManualClock};
pub use emitter::Reaction;
pub use engine::SparkleEngine;
pub use error::SparkleError;
pub use particle::{FreeParticle, OrbitalParticle, ParticleKind, ParticleStore, Sprite};
pub use raster::Pixmap;
pub use render::{BlendMode, ColorStop, LayerRole, Renderer, Surface};
