//! Configuration types for loading simulation scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! particle scenario. A scenario consists of:
//!
//! - [`EngineConfig`]     – global engine options (damping policy)
//! - [`ParametersConfig`] – run length and frame duration
//! - [`ParticleConfig`]   – initial state for each particle
//! - [`ForceConfig`]      – which generator acts on which particle
//! - [`ScenarioConfig`]   – top-level wrapper used to load a scenario from YAML
//!
//! # YAML format
//!
//! ```yaml
//! engine:
//!   damping_policy: "exponential"   # or "per_frame"
//!
//! parameters:
//!   t_end: 2.0                      # total simulated time in seconds
//!   frame: 0.016                    # fixed frame duration
//!
//! particles:
//!   - position: [0.0, 10.0, 0.0]
//!     velocity: [0.0, 0.0, 5.0]
//!     damping: 0.99
//!     mass: 2.0                     # or `inverse_mass: 0.5`
//!
//! forces:
//!   - particle: 0
//!     generator: { type: gravity, gravity: [0.0, -9.81, 0.0] }
//!   - particle: 0
//!     generator: { type: drag, k1: 0.1, k2: 0.01 }
//! ```
//!
//! The engine maps this configuration into its runtime
//! [`Simulation`](crate::simulation::scenario::Simulation).

use serde::Deserialize;
use thiserror::Error;

use crate::simulation::forces::DragLaw;
use crate::simulation::states::DampingPolicy;
use crate::simulation::vector::Vector3;

/// Problems found while turning a [`ScenarioConfig`] into a runtime scenario
#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("{field} must have exactly 3 components, got {len}")]
    BadVector { field: &'static str, len: usize },

    #[error("force {force} targets particle {particle}, but only {count} particles are defined")]
    UnknownParticle {
        force: usize,
        particle: usize,
        count: usize,
    },

    #[error("particle {index} needs either `mass` or `inverse_mass`")]
    MissingMass { index: usize },

    #[error("particle {index} has damping {damping}, expected a value in (0, 1]")]
    BadDamping { index: usize, damping: f64 },
}

/// Convert a YAML list into a [`Vector3`], naming the field on failure
pub fn vector3(field: &'static str, v: &[f64]) -> Result<Vector3, ConfigError> {
    match v {
        [x, y, z] => Ok(Vector3::new(*x, *y, *z)),
        _ => Err(ConfigError::BadVector { field, len: v.len() }),
    }
}

/// High-level engine configuration
#[derive(Deserialize, Debug, Default)]
pub struct EngineConfig {
    #[serde(default)]
    pub damping_policy: DampingPolicy, // how damping scales with frame duration
}

/// Run length and step size
#[derive(Deserialize, Debug, Clone)]
pub struct ParametersConfig {
    pub t_end: f64, // time end
    pub frame: f64, // frame duration fed to update_forces / integrate
}

/// Configuration for a single particle's initial state
#[derive(Deserialize, Debug)]
pub struct ParticleConfig {
    pub position: Vec<f64>,
    #[serde(default = "zero3")]
    pub velocity: Vec<f64>,
    #[serde(default = "zero3")]
    pub acceleration: Vec<f64>, // constant acceleration, e.g. a gravity bias
    #[serde(default = "one")]
    pub damping: f64, // fraction of velocity kept per second, in (0, 1]
    pub mass: Option<f64>, // non-positive means immovable
    pub inverse_mass: Option<f64>, // used when `mass` is absent
}

fn zero3() -> Vec<f64> {
    vec![0.0; 3]
}

fn one() -> f64 {
    1.0
}

/// `[k1, k2]` pair describing one drag profile
pub type DragProfile = [f64; 2];

/// A single force generator description
#[derive(Deserialize, Debug, Clone)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GeneratorConfig {
    Gravity {
        gravity: Vec<f64>,
    },
    Drag {
        k1: f64,
        k2: f64,
        #[serde(default)]
        law: DragLaw,
    },
    Uplift {
        center: Vec<f64>,
        radius: f64,
        force: f64,
    },
    AirBrake {
        #[serde(default)]
        on: bool,
        normal: DragProfile,
        braking: DragProfile,
    },
}

/// Binds a generator to the particle at index `particle`
#[derive(Deserialize, Debug)]
pub struct ForceConfig {
    pub particle: usize,
    pub generator: GeneratorConfig,
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug)]
pub struct ScenarioConfig {
    #[serde(default)]
    pub engine: EngineConfig,
    pub parameters: ParametersConfig,
    pub particles: Vec<ParticleConfig>,
    #[serde(default)]
    pub forces: Vec<ForceConfig>,
}
