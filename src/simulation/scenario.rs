//! Build fully-initialized simulations from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces the runtime bundle
//! [`Simulation`] containing:
//! - engine settings (`Engine`)
//! - run parameters (`Parameters`)
//! - the particle and generator arenas
//! - the force registry binding them
//!
//! `Simulation::step` is the frame loop body: accumulate, then integrate.

use tracing::{debug, info};

use crate::configuration::config::{vector3, ConfigError, GeneratorConfig, ScenarioConfig};
use crate::simulation::arena::Arena;
use crate::simulation::engine::Engine;
use crate::simulation::error::PhysicsError;
use crate::simulation::forces::{AirBrake, Drag, ForceKind, Gravity, Uplift};
use crate::simulation::integrator::{check_duration, integrate_all};
use crate::simulation::params::Parameters;
use crate::simulation::registry::{ForceRegistry, GeneratorHandle, ParticleHandle};
use crate::simulation::states::Particle;

/// Remaining time below this is treated as "already at t_end"
const TIME_SLOP: f64 = 1e-12;

#[derive(Debug)]
pub struct Simulation {
    pub engine: Engine,
    pub parameters: Parameters,
    pub particles: Arena<Particle>,
    pub generators: Arena<ForceKind>,
    pub registry: ForceRegistry,
    pub t: f64, // simulated time so far
}

impl Simulation {
    pub fn new(engine: Engine, parameters: Parameters) -> Self {
        Self {
            engine,
            parameters,
            particles: Arena::new(),
            generators: Arena::new(),
            registry: ForceRegistry::new(),
            t: 0.0,
        }
    }

    pub fn add_particle(&mut self, particle: Particle) -> ParticleHandle {
        self.particles.insert(particle)
    }

    pub fn add_generator(&mut self, generator: impl Into<ForceKind>) -> GeneratorHandle {
        self.generators.insert(generator.into())
    }

    /// Remove a particle together with every registration that names it
    pub fn remove_particle(&mut self, handle: ParticleHandle) -> Option<Particle> {
        self.registry.remove_particle(handle);
        self.particles.remove(handle)
    }

    pub fn build_scenario(cfg: ScenarioConfig) -> Result<Self, ConfigError> {
        let engine = Engine {
            damping_policy: cfg.engine.damping_policy,
        };
        let parameters = Parameters {
            t_end: cfg.parameters.t_end,
            frame: cfg.parameters.frame,
        };
        let mut sim = Self::new(engine, parameters);

        // Particles: map `ParticleConfig` -> runtime `Particle`, remembering handles by index
        let mut handles = Vec::with_capacity(cfg.particles.len());
        for (index, pc) in cfg.particles.iter().enumerate() {
            let position = vector3("position", &pc.position)?;
            let velocity = vector3("velocity", &pc.velocity)?;
            let acceleration = vector3("acceleration", &pc.acceleration)?;
            if !(pc.damping > 0.0 && pc.damping <= 1.0) {
                return Err(ConfigError::BadDamping { index, damping: pc.damping });
            }

            let particle = match (pc.mass, pc.inverse_mass) {
                (Some(m), _) => Particle::with_mass(position, velocity, acceleration, pc.damping, m),
                (None, Some(im)) => {
                    Particle::with_inverse_mass(position, velocity, acceleration, pc.damping, im)
                }
                (None, None) => return Err(ConfigError::MissingMass { index }),
            };
            handles.push(sim.add_particle(particle));
        }

        // Forces: one generator per entry, registered against its particle
        for (force, fc) in cfg.forces.iter().enumerate() {
            let particle = *handles.get(fc.particle).ok_or(ConfigError::UnknownParticle {
                force,
                particle: fc.particle,
                count: handles.len(),
            })?;

            let generator: ForceKind = match &fc.generator {
                GeneratorConfig::Gravity { gravity } => Gravity::new(vector3("gravity", gravity)?).into(),
                GeneratorConfig::Drag { k1, k2, law } => Drag::new(*k1, *k2).with_law(*law).into(),
                GeneratorConfig::Uplift { center, radius, force } => {
                    Uplift::new(vector3("center", center)?, *radius, *force).into()
                }
                GeneratorConfig::AirBrake { on, normal, braking } => {
                    let mut brake = AirBrake::new(
                        Drag::new(normal[0], normal[1]),
                        Drag::new(braking[0], braking[1]),
                    );
                    brake.set_on(*on);
                    brake.into()
                }
            };

            let handle = sim.add_generator(generator);
            sim.registry.add(particle, handle);
        }

        info!(
            particles = sim.particles.len(),
            registrations = sim.registry.len(),
            "scenario built"
        );
        Ok(sim)
    }

    /// One frame: accumulate forces for `duration`, then integrate every movable particle
    ///
    /// A rejected duration fails before any force is accumulated.
    pub fn step(&mut self, duration: f64) -> Result<usize, PhysicsError> {
        check_duration(duration)?;
        self.registry
            .update_forces(duration, &mut self.particles, &self.generators);
        let advanced = integrate_all(&mut self.particles, duration, self.engine.damping_policy)?;
        self.t += duration;
        Ok(advanced)
    }

    /// Step with `parameters.frame` until `parameters.t_end`, shortening the last frame
    ///
    /// Returns the number of frames run.
    pub fn run(&mut self) -> Result<usize, PhysicsError> {
        let frame = self.parameters.frame;
        if frame.is_nan() || frame <= 0.0 {
            return Err(PhysicsError::invalid_duration(frame));
        }
        let t_end = self.parameters.t_end;
        if !t_end.is_finite() {
            return Err(PhysicsError::invalid_end_time(t_end));
        }

        let mut frames = 0;
        loop {
            let remaining = self.parameters.t_end - self.t;
            if remaining <= TIME_SLOP {
                break;
            }
            let dt = frame.min(remaining);
            self.step(dt)?;
            frames += 1;
            debug!(frame = frames, t = self.t, "frame done");
        }
        Ok(frames)
    }
}
