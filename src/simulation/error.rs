//! Error values returned by the simulation core
//!
//! Every fallible operation returns a [`PhysicsError`]. The helper
//! constructors record the failure at ERROR level before handing it back,
//! so a host that installs a `tracing` subscriber sees each failed frame.

use thiserror::Error;
use tracing::error;

#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum PhysicsError {
    /// `integrate` was called on a particle with inverse mass 0
    #[error("integration is not performed on a particle with infinite mass")]
    InfiniteMassIntegration,

    /// `integrate` was called with a negative (or NaN) duration
    #[error("cannot integrate over duration {duration}")]
    InvalidDuration { duration: f64 },

    /// A run was asked to stop at a NaN or infinite time
    #[error("cannot run until non-finite end time {t_end}")]
    InvalidEndTime { t_end: f64 },

    /// Orthonormal basis requested from two parallel vectors
    #[error("cannot build an orthonormal basis from parallel vectors")]
    ParallelBasisVectors,
}

impl PhysicsError {
    pub(crate) fn infinite_mass_integration() -> Self {
        Self::InfiniteMassIntegration.logged()
    }

    pub(crate) fn invalid_duration(duration: f64) -> Self {
        Self::InvalidDuration { duration }.logged()
    }

    pub(crate) fn invalid_end_time(t_end: f64) -> Self {
        Self::InvalidEndTime { t_end }.logged()
    }

    pub(crate) fn parallel_basis_vectors() -> Self {
        Self::ParallelBasisVectors.logged()
    }

    fn logged(self) -> Self {
        error!(error = %self, "physics error");
        self
    }
}
