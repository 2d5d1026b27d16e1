//! Force registry: which generators act on which particles
//!
//! The registry stores `(particle, generator)` handle pairs in insertion
//! order. It owns neither side; particles and generators live in their own
//! [`Arena`]s and the registry only drives accumulation:
//!
//! 1. `update_forces(dt, ..)` runs every registered generator on its particle,
//! 2. the caller then integrates each particle (which clears its accumulator).
//!
//! Calling them the other way round drops that frame's forces silently.

use tracing::debug;

use super::arena::{Arena, Handle};
use super::forces::{ForceGenerator, ForceKind};
use super::states::Particle;

pub type ParticleHandle = Handle<Particle>;
pub type GeneratorHandle = Handle<ForceKind>;

/// One generator acting on one particle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Registration {
    pub particle: ParticleHandle,
    pub generator: GeneratorHandle,
}

#[derive(Debug, Default)]
pub struct ForceRegistry {
    registrations: Vec<Registration>,
}

impl ForceRegistry {
    pub fn new() -> Self {
        Self {
            registrations: Vec::new(),
        }
    }

    /// Register `generator` to act on `particle`. Duplicates fire twice
    pub fn add(&mut self, particle: ParticleHandle, generator: GeneratorHandle) {
        self.registrations.push(Registration { particle, generator });
    }

    /// Remove the first matching registration. Returns `false` if none matched
    pub fn remove(&mut self, particle: ParticleHandle, generator: GeneratorHandle) -> bool {
        let found = self
            .registrations
            .iter()
            .position(|r| r.particle == particle && r.generator == generator);

        match found {
            Some(i) => {
                // keep insertion order for the remaining registrations
                self.registrations.remove(i);
                true
            }
            None => false,
        }
    }

    /// Drop every registration naming `particle`
    pub fn remove_particle(&mut self, particle: ParticleHandle) -> usize {
        let before = self.registrations.len();
        self.registrations.retain(|r| r.particle != particle);
        before - self.registrations.len()
    }

    /// Forget all registrations. Particles and generators are untouched
    pub fn clear(&mut self) {
        self.registrations.clear();
    }

    pub fn contains(&self, particle: ParticleHandle, generator: GeneratorHandle) -> bool {
        self.registrations
            .iter()
            .any(|r| r.particle == particle && r.generator == generator)
    }

    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Registration> + '_ {
        self.registrations.iter()
    }

    /// Drop registrations whose particle or generator no longer exists
    pub fn prune(&mut self, particles: &Arena<Particle>, generators: &Arena<ForceKind>) -> usize {
        let before = self.registrations.len();
        self.registrations
            .retain(|r| particles.contains(r.particle) && generators.contains(r.generator));
        before - self.registrations.len()
    }

    /// Run every registered generator on its particle, in insertion order
    ///
    /// Registrations pointing at removed particles or generators are skipped.
    pub fn update_forces(
        &self,
        duration: f64,
        particles: &mut Arena<Particle>,
        generators: &Arena<ForceKind>,
    ) {
        for reg in &self.registrations {
            let Some(generator) = generators.get(reg.generator) else {
                debug!(generator = ?reg.generator, "skipping stale generator handle");
                continue;
            };
            let Some(particle) = particles.get_mut(reg.particle) else {
                debug!(particle = ?reg.particle, "skipping stale particle handle");
                continue;
            };
            generator.update_force(particle, duration);
        }
    }
}
