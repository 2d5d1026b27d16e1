//! Per-frame integration for point masses
//!
//! Semi-implicit Euler: position advances with the velocity from *before*
//! the velocity update, then velocity absorbs the constant acceleration and
//! the accumulated force, then damping is applied and the accumulator is
//! cleared. Forces must be accumulated (see `registry`) before this runs in
//! the same frame; integrating first silently drops them.

use tracing::trace;

use super::arena::Arena;
use super::error::PhysicsError;
use super::states::{DampingPolicy, Particle};

impl Particle {
    /// Advance this particle by `duration` seconds with exponential damping
    pub fn integrate(&mut self, duration: f64) -> Result<(), PhysicsError> {
        self.integrate_with(duration, DampingPolicy::Exponential)
    }

    /// Advance this particle by `duration` seconds using the given damping policy
    ///
    /// Fails without touching the particle when its mass is infinite or the
    /// duration is negative. A zero duration succeeds, leaves position and
    /// velocity alone and only clears the accumulator.
    pub fn integrate_with(&mut self, duration: f64, policy: DampingPolicy) -> Result<(), PhysicsError> {
        if self.inverse_mass <= 0.0 {
            return Err(PhysicsError::infinite_mass_integration());
        }
        check_duration(duration)?;

        if duration == 0.0 {
            self.clear_forces();
            return Ok(());
        }

        // x_n+1 = x_n + v_n * dt (old velocity)
        self.position.add_scaled(self.velocity, duration);

        // a = a_const + F / m
        let resulting_acc = self
            .acceleration
            .with_added_scaled(self.force_accumulator, self.inverse_mass);

        // v_n+1 = v_n + a * dt
        self.velocity.add_scaled(resulting_acc, duration);

        let damping_factor = match policy {
            DampingPolicy::Exponential => self.damping.powf(duration),
            DampingPolicy::PerFrame => self.damping,
        };
        self.velocity.scale(damping_factor);

        self.clear_forces();

        Ok(())
    }
}

pub(crate) fn check_duration(duration: f64) -> Result<(), PhysicsError> {
    if duration.is_nan() || duration < 0.0 {
        return Err(PhysicsError::invalid_duration(duration));
    }
    Ok(())
}

/// Integrate every finite-mass particle in `particles`
///
/// Infinite-mass particles are immovable and skipped rather than reported;
/// their accumulators are still cleared so forces never pile up on them.
/// Returns the number of particles that were advanced.
pub fn integrate_all(
    particles: &mut Arena<Particle>,
    duration: f64,
    policy: DampingPolicy,
) -> Result<usize, PhysicsError> {
    check_duration(duration)?;

    let mut advanced = 0;
    for (handle, p) in particles.iter_mut() {
        if !p.has_finite_mass() {
            trace!(?handle, "skipping immovable particle");
            p.clear_forces();
            continue;
        }
        p.integrate_with(duration, policy)?;
        advanced += 1;
    }
    Ok(advanced)
}
