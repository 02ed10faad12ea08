//! Orbit release: turns every orbital particle into a ballistic free particle.

use crate::config::Span;
use crate::particle::{FreeParticle, OrbitalParticle, ParticleKind, ParticleStore};
use rand::Rng;

/// Free particle leaving the orbit at its current position with the orbit's
/// tangential velocity plus `radial_speed` outward.
pub fn release(orbital: &OrbitalParticle, radial_speed: f64) -> FreeParticle {
    let outward = orbital.direction() * radial_speed;
    FreeParticle {
        kind: ParticleKind::Dispersed,
        position: orbital.position(),
        velocity: orbital.tangential_velocity() + outward,
        life: orbital.life,
        size: orbital.size,
        hue: orbital.hue,
    }
}

/// Convert the whole orbital pool in one pass. Afterwards the orbital pool is
/// empty and the free pool grew by the returned count.
pub fn disperse<R: Rng>(store: &mut ParticleStore, radial_speed: Span, rng: &mut R) -> usize {
    let orbitals = store.take_orbital();
    let count = orbitals.len();
    store.reserve_free(count);
    for orbital in &orbitals {
        store.push_free(release(orbital, radial_speed.sample(rng)));
    }
    count
}
