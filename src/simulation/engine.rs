//! High-level runtime engine settings
//!
//! Selects how damping is applied when a `Simulation` integrates its particles

use crate::simulation::states::DampingPolicy;

#[derive(Debug, Clone, Default)]
pub struct Engine {
    pub damping_policy: DampingPolicy, // exponential (frame-rate independent) or per-frame
}
