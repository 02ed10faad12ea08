//! Engine tuning, grouped per component.
//!
//! `SparkleConfig::default()` reproduces the constants in [`crate::constants`].
//! Front-ends may tweak individual fields before building an engine; every
//! engine constructor runs [`SparkleConfig::validate`] first so sampling never
//! sees an inverted range.

use crate::constants::*;
use crate::error::{Result, SparkleError};
use rand::Rng;

/// Closed interval sampled uniformly.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Span {
    pub min: f64,
    pub max: f64,
}

impl Span {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn sample<R: Rng>(&self, rng: &mut R) -> f64 {
        if self.max > self.min {
            rng.gen_range(self.min..=self.max)
        } else {
            self.min
        }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    fn check(&self, name: &'static str) -> Result<()> {
        if self.min > self.max || self.min.is_nan() || self.max.is_nan() {
            return Err(SparkleError::InvertedRange {
                name,
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }
}

/// Zero-mean uniform offset in `[-amount, amount]`.
#[inline]
pub fn jitter<R: Rng>(rng: &mut R, amount: f64) -> f64 {
    if amount > 0.0 {
        rng.gen_range(-amount..=amount)
    } else {
        0.0
    }
}

#[derive(Clone, Debug)]
pub struct TrailParams {
    pub interval_ms: f64,
    pub per_emit: usize,
    pub position_jitter: f64,
    pub speed_max: f64,
    pub size: Span,
    pub hue_jitter: f64,
}

impl Default for TrailParams {
    fn default() -> Self {
        Self {
            interval_ms: TRAIL_INTERVAL_MS,
            per_emit: TRAIL_PARTICLES_PER_EMIT,
            position_jitter: TRAIL_POSITION_JITTER,
            speed_max: TRAIL_SPEED_MAX,
            size: Span::new(TRAIL_SIZE_MIN, TRAIL_SIZE_MAX),
            hue_jitter: TRAIL_HUE_JITTER,
        }
    }
}

#[derive(Clone, Debug)]
pub struct BurstParams {
    pub count_min: usize,
    pub count_max: usize,
    pub angle_jitter: f64,
    pub speed: Span,
    pub pop: Span,
    pub size: Span,
    pub hue_jitter: f64,
}

impl Default for BurstParams {
    fn default() -> Self {
        Self {
            count_min: BURST_COUNT_MIN,
            count_max: BURST_COUNT_MAX,
            angle_jitter: BURST_ANGLE_JITTER,
            speed: Span::new(BURST_SPEED_MIN, BURST_SPEED_MAX),
            pop: Span::new(0.0, BURST_POP_MAX),
            size: Span::new(BURST_SIZE_MIN, BURST_SIZE_MAX),
            hue_jitter: BURST_HUE_JITTER,
        }
    }
}

#[derive(Clone, Debug)]
pub struct OrbitParams {
    pub spawn_interval_ms: f64,
    pub spawn_min: usize,
    pub spawn_max: usize,
    pub max_particles: usize,
    pub start_radius: Span,
    pub stable_radius: f64,
    pub radius_decay: f64,
    pub spin_gain: f64,
    pub spin_jitter: f64,
    pub size: Span,
    pub hue_jitter: f64,
    /// Outward kick given to each particle on dispersal.
    pub dispersal_speed: Span,
}

impl Default for OrbitParams {
    fn default() -> Self {
        Self {
            spawn_interval_ms: ORBIT_SPAWN_INTERVAL_MS,
            spawn_min: ORBIT_SPAWN_MIN,
            spawn_max: ORBIT_SPAWN_MAX,
            max_particles: ORBIT_MAX_PARTICLES,
            start_radius: Span::new(ORBIT_RADIUS_MIN, ORBIT_RADIUS_MAX),
            stable_radius: ORBIT_STABLE_RADIUS,
            radius_decay: ORBIT_RADIUS_DECAY,
            spin_gain: ORBIT_SPIN_GAIN,
            spin_jitter: ORBIT_SPIN_JITTER,
            size: Span::new(ORBIT_SIZE_MIN, ORBIT_SIZE_MAX),
            hue_jitter: ORBIT_HUE_JITTER,
            dispersal_speed: Span::new(DISPERSAL_SPEED_MIN, DISPERSAL_SPEED_MAX),
        }
    }
}

#[derive(Clone, Debug)]
pub struct PhysicsParams {
    pub gravity: f64,
    pub drag: f64,
    pub life_decay: f64,
}

impl Default for PhysicsParams {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            drag: DRAG,
            life_decay: LIFE_DECAY,
        }
    }
}

#[derive(Clone, Debug)]
pub struct RenderParams {
    pub glow_scale: f64,
    pub highlight_scale: f64,
    pub cursor_glow_radius: f64,
    pub cursor_core_radius: f64,
}

impl Default for RenderParams {
    fn default() -> Self {
        Self {
            glow_scale: GLOW_SCALE,
            highlight_scale: HIGHLIGHT_SCALE,
            cursor_glow_radius: CURSOR_GLOW_RADIUS,
            cursor_core_radius: CURSOR_CORE_RADIUS,
        }
    }
}

#[derive(Clone, Debug)]
pub struct SparkleConfig {
    pub base_hue: f64,
    pub hold_threshold_ms: f64,
    pub tap_threshold_px: f64,
    pub ghost_click_window_ms: f64,
    /// A click only inherits the duration of a press released this recently.
    pub click_window_ms: f64,
    pub trail: TrailParams,
    pub burst: BurstParams,
    pub orbit: OrbitParams,
    pub physics: PhysicsParams,
    pub render: RenderParams,
}

impl Default for SparkleConfig {
    fn default() -> Self {
        Self {
            base_hue: GOLD_HUE,
            hold_threshold_ms: HOLD_THRESHOLD_MS,
            tap_threshold_px: TAP_THRESHOLD_PX,
            ghost_click_window_ms: GHOST_CLICK_WINDOW_MS,
            click_window_ms: CLICK_AFTER_RELEASE_MS,
            trail: TrailParams::default(),
            burst: BurstParams::default(),
            orbit: OrbitParams::default(),
            physics: PhysicsParams::default(),
            render: RenderParams::default(),
        }
    }
}

impl SparkleConfig {
    pub fn validate(&self) -> Result<()> {
        positive("hold threshold", self.hold_threshold_ms)?;
        positive("tap threshold", self.tap_threshold_px)?;
        positive("click window", self.click_window_ms)?;

        self.trail.size.check("trail size")?;
        positive("trail min size", self.trail.size.min)?;

        if self.burst.count_min == 0 || self.burst.count_min > self.burst.count_max {
            return Err(SparkleError::InvalidCount {
                name: "burst",
                min: self.burst.count_min,
                max: self.burst.count_max,
            });
        }
        self.burst.speed.check("burst speed")?;
        self.burst.pop.check("burst pop")?;
        self.burst.size.check("burst size")?;
        positive("burst min size", self.burst.size.min)?;

        let orbit = &self.orbit;
        if orbit.max_particles == 0 {
            return Err(SparkleError::ZeroOrbitCap);
        }
        if orbit.spawn_min == 0 || orbit.spawn_min > orbit.spawn_max {
            return Err(SparkleError::InvalidCount {
                name: "orbit spawn",
                min: orbit.spawn_min,
                max: orbit.spawn_max,
            });
        }
        orbit.start_radius.check("orbit start radius")?;
        positive("orbit stable radius", orbit.stable_radius)?;
        if orbit.start_radius.min <= orbit.stable_radius {
            return Err(SparkleError::OrbitInsideStableRadius {
                start: orbit.start_radius.min,
                stable: orbit.stable_radius,
            });
        }
        unit_rate("orbit radius decay", orbit.radius_decay)?;
        positive("orbit spin gain", orbit.spin_gain)?;
        orbit.size.check("orbit size")?;
        positive("orbit min size", orbit.size.min)?;
        orbit.dispersal_speed.check("dispersal speed")?;

        positive("life decay", self.physics.life_decay)?;
        unit_rate("drag", self.physics.drag)?;
        Ok(())
    }
}

fn positive(name: &'static str, value: f64) -> Result<()> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(SparkleError::NonPositive { name, value })
    }
}

fn unit_rate(name: &'static str, value: f64) -> Result<()> {
    if value > 0.0 && value < 1.0 {
        Ok(())
    } else {
        Err(SparkleError::RateOutOfRange { name, value })
    }
}
