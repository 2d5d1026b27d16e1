//! Core state types for the point-mass simulation.
//!
//! Defines the [`Particle`]: a point mass with position, velocity, a constant
//! acceleration, damping, an inverse mass and a per-frame force accumulator.
//! The integration step itself lives in `integrator`.

use serde::Deserialize;

use super::vector::Vector3;

/// How damping is applied to velocity at the end of an integration step
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DampingPolicy {
    /// `velocity *= damping ^ duration`, independent of frame rate
    #[default]
    #[serde(rename = "exponential")]
    Exponential,

    /// `velocity *= damping` once per call, so the drag rate depends on frame rate
    #[serde(rename = "per_frame")]
    PerFrame,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub position: Vector3, // world-space position
    pub velocity: Vector3, // world-space velocity
    pub acceleration: Vector3, // constant acceleration (gravity bias etc.), never changed by integration
    pub damping: f64, // fraction of velocity kept per second, 1.0 = no damping
    pub(crate) inverse_mass: f64, // 0 = infinite mass
    pub(crate) force_accumulator: Vector3, // cleared by every successful integration
}

impl Particle {
    /// Build a particle from its mass. Non-positive mass means infinite mass
    pub fn with_mass(
        position: Vector3,
        velocity: Vector3,
        acceleration: Vector3,
        damping: f64,
        mass: f64,
    ) -> Self {
        let mut p = Self {
            position,
            velocity,
            acceleration,
            damping,
            ..Self::default()
        };
        p.set_mass(mass);
        p
    }

    /// Build a particle from its inverse mass. Non-positive values mean infinite mass
    pub fn with_inverse_mass(
        position: Vector3,
        velocity: Vector3,
        acceleration: Vector3,
        damping: f64,
        inverse_mass: f64,
    ) -> Self {
        let mut p = Self {
            position,
            velocity,
            acceleration,
            damping,
            ..Self::default()
        };
        p.set_inverse_mass(inverse_mass);
        p
    }

    pub fn set_mass(&mut self, mass: f64) {
        self.inverse_mass = if mass <= 0.0 { 0.0 } else { 1.0 / mass };
    }

    pub fn set_inverse_mass(&mut self, inverse_mass: f64) {
        self.inverse_mass = if inverse_mass <= 0.0 { 0.0 } else { inverse_mass };
    }

    pub fn inverse_mass(&self) -> f64 {
        self.inverse_mass
    }

    /// `1 / inverse_mass`, or `f64::INFINITY` for an immovable particle
    pub fn mass(&self) -> f64 {
        if self.inverse_mass == 0.0 {
            f64::INFINITY
        } else {
            1.0 / self.inverse_mass
        }
    }

    pub fn has_finite_mass(&self) -> bool {
        self.inverse_mass > 0.0
    }

    /// `0.5 * m * |v|^2`
    ///
    /// Infinite-mass particles report 0.0; the physical value is undefined
    /// for them and callers should check [`Particle::has_finite_mass`] first.
    pub fn kinetic_energy(&self) -> f64 {
        if !self.has_finite_mass() {
            return 0.0;
        }
        0.5 * self.mass() * self.velocity.magnitude_squared()
    }

    /// Queue `force` for the next integration step
    pub fn add_force(&mut self, force: Vector3) {
        self.force_accumulator.accumulate(force);
    }

    pub fn clear_forces(&mut self) {
        self.force_accumulator = Vector3::ZERO;
    }

    /// Sum of all forces queued since the last successful integration
    pub fn accumulated_force(&self) -> Vector3 {
        self.force_accumulator
    }
}

impl Default for Particle {
    /// At rest at the origin, infinite mass, no damping
    fn default() -> Self {
        Self {
            position: Vector3::ZERO,
            velocity: Vector3::ZERO,
            acceleration: Vector3::ZERO,
            damping: 1.0,
            inverse_mass: 0.0,
            force_accumulator: Vector3::ZERO,
        }
    }
}
