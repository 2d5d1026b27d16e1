//! Ballistic rounds: preset projectiles fired from a fixed muzzle
//!
//! A headless version of the classic ballistics demo. Each [`ShotType`]
//! maps to a particle preset (mass, muzzle velocity, constant acceleration,
//! damping). Live rounds are integrated every frame and retired once they
//! hit the ground, leave the range or outlive their lifetime.

use clap::ValueEnum;
use tracing::{debug, info};

use super::error::PhysicsError;
use super::integrator::check_duration;
use super::states::Particle;
use super::vector::Vector3;

/// Muzzle position shared by every round
pub const MUZZLE: Vector3 = Vector3::new(0.0, 1.5, 0.0);

/// Rounds older than this are retired (seconds)
pub const ROUND_LIFETIME: f64 = 5.0;

/// Rounds further downrange than this are retired
pub const RANGE_LIMIT: f64 = 200.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ShotType {
    Pistol,
    Artillery,
    Fireball,
    Laser,
}

impl ShotType {
    /// Fresh particle for this shot, sitting at the muzzle
    pub fn particle(self) -> Particle {
        // (mass kg, velocity, acceleration, damping); masses are exaggerated on purpose
        let (mass, velocity, acceleration, damping) = match self {
            ShotType::Pistol => (2.0, Vector3::new(0.0, 0.0, 35.0), Vector3::new(0.0, -1.0, 0.0), 0.99),
            ShotType::Artillery => (200.0, Vector3::new(0.0, 30.0, 40.0), Vector3::new(0.0, -20.0, 0.0), 0.99),
            // floats up
            ShotType::Fireball => (1.0, Vector3::new(0.0, 0.0, 10.0), Vector3::new(0.0, 0.6, 0.0), 0.9),
            // no gravity at all
            ShotType::Laser => (0.1, Vector3::new(0.0, 0.0, 100.0), Vector3::ZERO, 0.99),
        };
        Particle::with_mass(MUZZLE, velocity, acceleration, damping, mass)
    }
}

#[derive(Debug, Clone)]
pub struct Round {
    pub particle: Particle,
    pub shot: ShotType,
    pub fired_at: f64, // simulated time of firing
}

impl Round {
    /// Whether this round should be taken off the range at time `now`
    pub fn expired(&self, now: f64) -> bool {
        let p = self.particle.position;

        // Fireballs linger, so they get a tighter box
        if self.shot == ShotType::Fireball && (p.z() > 50.0 || p.y() > 20.0) {
            return true;
        }

        p.y() < 0.0 || now - self.fired_at > ROUND_LIFETIME || p.z() > RANGE_LIMIT
    }
}

/// Fixed pool of round slots plus a simulated clock
#[derive(Debug)]
pub struct Range {
    slots: Vec<Option<Round>>,
    pub t: f64,
}

impl Range {
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![None; capacity],
            t: 0.0,
        }
    }

    /// Fire into the first free slot. Returns `false` when every slot is live
    pub fn fire(&mut self, shot: ShotType) -> bool {
        let Some(slot) = self.slots.iter_mut().find(|s| s.is_none()) else {
            return false;
        };
        *slot = Some(Round {
            particle: shot.particle(),
            shot,
            fired_at: self.t,
        });
        info!(?shot, t = self.t, "fire");
        true
    }

    /// Advance every live round by `duration` and retire the expired ones
    ///
    /// A zero duration does nothing; negative or NaN durations are rejected.
    pub fn update(&mut self, duration: f64) -> Result<(), PhysicsError> {
        check_duration(duration)?;
        if duration == 0.0 {
            return Ok(());
        }
        self.t += duration;

        for slot in self.slots.iter_mut() {
            let Some(round) = slot else { continue };
            round.particle.integrate(duration)?;

            if round.expired(self.t) {
                debug!(shot = ?round.shot, position = %round.particle.position, "round retired");
                *slot = None;
            }
        }
        Ok(())
    }

    pub fn live(&self) -> impl Iterator<Item = &Round> + '_ {
        self.slots.iter().flatten()
    }
}
