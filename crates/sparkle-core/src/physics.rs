//! Per-frame integration. Steps are in px/frame; there is no dt scaling.

use crate::config::{jitter, OrbitParams, PhysicsParams};
use crate::particle::{FreeParticle, OrbitalParticle, ParticleStore};
use glam::DVec2;
use rand::Rng;
use std::f64::consts::TAU;

#[inline]
pub fn integrate_free(p: &mut FreeParticle, physics: &PhysicsParams) {
    p.position += p.velocity;
    if p.kind.is_ballistic() {
        p.velocity.y += physics.gravity;
        p.velocity *= physics.drag;
    }
    p.life -= physics.life_decay;
}

/// Advance every free particle and drop the ones whose life ran out this
/// frame. Returns the number removed.
pub fn step_free(store: &mut ParticleStore, physics: &PhysicsParams) -> usize {
    for p in store.free_mut() {
        integrate_free(p, physics);
    }
    store.sweep_free()
}

#[inline]
pub fn integrate_orbital<R: Rng>(
    p: &mut OrbitalParticle,
    center: DVec2,
    orbit: &OrbitParams,
    rng: &mut R,
) {
    p.center = center;
    p.angle = (p.angle + p.angular_velocity).rem_euclid(TAU);

    // Exponential approach; once the step can no longer land strictly above
    // the stable radius the particle stays put.
    let stable = orbit.stable_radius;
    let next = p.radius - (p.radius - stable) * p.spiral_speed;
    if next > stable {
        p.radius = next;
    }

    p.angular_velocity += jitter(rng, orbit.spin_jitter);
}

/// Orbital particles never expire here; only dispersal removes them.
pub fn step_orbital<R: Rng>(
    store: &mut ParticleStore,
    center: DVec2,
    orbit: &OrbitParams,
    rng: &mut R,
) {
    for p in store.orbital_mut() {
        integrate_orbital(p, center, orbit, rng);
    }
}
