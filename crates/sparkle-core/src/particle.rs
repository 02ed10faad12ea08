//! Particle types and the two typed pools that own them.
//!
//! Free particles move linearly and fade; orbital particles live in polar
//! coordinates around the pointer and never fade until they are dispersed.
//! Both pools are unordered: removal uses `retain` and dispersal drains the
//! orbital pool wholesale.

use glam::DVec2;

/// What created a free particle, and therefore how it moves.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParticleKind {
    /// Slow ambient drift left behind by pointer motion.
    Trail,
    /// Radial explosion from a tap or click.
    Burst,
    /// Former orbital particle flung out on release.
    Dispersed,
}

impl ParticleKind {
    /// Ballistic particles fall under gravity and slow down with drag.
    #[inline]
    pub fn is_ballistic(self) -> bool {
        !matches!(self, ParticleKind::Trail)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct FreeParticle {
    pub kind: ParticleKind,
    pub position: DVec2,
    /// px/frame
    pub velocity: DVec2,
    /// Starts at 1.0 and only decreases; the particle dies at or below 0.
    pub life: f64,
    pub size: f64,
    pub hue: f64,
}

impl FreeParticle {
    pub fn new(kind: ParticleKind, position: DVec2, velocity: DVec2, size: f64, hue: f64) -> Self {
        Self {
            kind,
            position,
            velocity,
            life: 1.0,
            size,
            hue,
        }
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.life > 0.0
    }

    pub fn sprite(&self) -> Sprite {
        Sprite {
            position: self.position,
            size: self.size,
            life: self.life,
            hue: self.hue,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct OrbitalParticle {
    /// Orbital phase in radians, kept in `[0, 2π)`.
    pub angle: f64,
    /// Distance from `center`; approaches the stable radius without reaching it.
    pub radius: f64,
    /// rad/frame, signed.
    pub angular_velocity: f64,
    /// Fraction of the gap to the stable radius closed each frame.
    pub spiral_speed: f64,
    /// Follows the live pointer.
    pub center: DVec2,
    pub life: f64,
    pub size: f64,
    pub hue: f64,
}

impl OrbitalParticle {
    #[inline]
    pub fn direction(&self) -> DVec2 {
        DVec2::new(self.angle.cos(), self.angle.sin())
    }

    /// Cartesian position on the surface.
    pub fn position(&self) -> DVec2 {
        self.center + self.direction() * self.radius
    }

    /// Velocity along the orbit (angle + 90°), `ω·r` in magnitude.
    pub fn tangential_velocity(&self) -> DVec2 {
        self.direction().perp() * (self.angular_velocity * self.radius)
    }

    pub fn sprite(&self) -> Sprite {
        Sprite {
            position: self.position(),
            size: self.size,
            life: self.life,
            hue: self.hue,
        }
    }
}

/// Everything the renderer needs to paint one particle of either pool.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sprite {
    pub position: DVec2,
    pub size: f64,
    pub life: f64,
    pub hue: f64,
}

impl Sprite {
    /// Core radius: base size shrinking with remaining life.
    #[inline]
    pub fn radius(&self) -> f64 {
        self.size * self.life.max(0.0)
    }

    #[inline]
    pub fn alpha(&self) -> f64 {
        self.life.clamp(0.0, 1.0)
    }
}

#[derive(Clone, Debug, Default)]
pub struct ParticleStore {
    free: Vec<FreeParticle>,
    orbital: Vec<OrbitalParticle>,
}

impl ParticleStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn free(&self) -> &[FreeParticle] {
        &self.free
    }

    pub fn orbital(&self) -> &[OrbitalParticle] {
        &self.orbital
    }

    pub fn free_count(&self) -> usize {
        self.free.len()
    }

    pub fn orbital_count(&self) -> usize {
        self.orbital.len()
    }

    pub fn len(&self) -> usize {
        self.free.len() + self.orbital.len()
    }

    pub fn is_empty(&self) -> bool {
        self.free.is_empty() && self.orbital.is_empty()
    }

    pub fn push_free(&mut self, particle: FreeParticle) {
        self.free.push(particle);
    }

    pub fn push_orbital(&mut self, particle: OrbitalParticle) {
        self.orbital.push(particle);
    }

    pub(crate) fn free_mut(&mut self) -> &mut [FreeParticle] {
        &mut self.free
    }

    pub(crate) fn orbital_mut(&mut self) -> &mut [OrbitalParticle] {
        &mut self.orbital
    }

    pub(crate) fn reserve_free(&mut self, additional: usize) {
        self.free.reserve(additional);
    }

    /// Drop dead free particles, returning how many were removed.
    pub(crate) fn sweep_free(&mut self) -> usize {
        let before = self.free.len();
        self.free.retain(FreeParticle::is_alive);
        before - self.free.len()
    }

    /// Empty the orbital pool, handing its particles to the caller.
    pub(crate) fn take_orbital(&mut self) -> Vec<OrbitalParticle> {
        std::mem::take(&mut self.orbital)
    }

    pub fn clear(&mut self) {
        self.free.clear();
        self.orbital.clear();
    }

    pub fn free_sprites(&self) -> impl Iterator<Item = Sprite> + '_ {
        self.free.iter().map(FreeParticle::sprite)
    }

    pub fn orbital_sprites(&self) -> impl Iterator<Item = Sprite> + '_ {
        self.orbital.iter().map(OrbitalParticle::sprite)
    }

    /// Free particles first, then orbital ones.
    pub fn sprites(&self) -> impl Iterator<Item = Sprite> + '_ {
        self.free_sprites().chain(self.orbital_sprites())
    }
}
