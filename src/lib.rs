pub mod simulation;
pub mod configuration;
pub mod benchmark;

pub use simulation::vector::{Vector3, make_orthonormal_basis, deg_to_rad, rad_to_deg, EPSILON};
pub use simulation::error::PhysicsError;
pub use simulation::arena::{Arena, Handle};
pub use simulation::states::{Particle, DampingPolicy};
pub use simulation::forces::{ForceGenerator, ForceKind, Gravity, Drag, DragLaw, Uplift, AirBrake};
pub use simulation::integrator::integrate_all;
pub use simulation::registry::{ForceRegistry, Registration, ParticleHandle, GeneratorHandle};
pub use simulation::scenario::Simulation;
pub use simulation::ballistic::{Range, Round, ShotType};

pub use configuration::config::{ScenarioConfig, EngineConfig, ParametersConfig, ParticleConfig, ForceConfig, GeneratorConfig, ConfigError};

pub use benchmark::benchmark::{compare_damping, compare_damping_seeded, bench_step_curve, CompareParams, CompareReport};
