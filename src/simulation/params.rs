//! Numerical parameters for a simulation run
//!
//! `Parameters` holds runtime settings:
//! - total simulated time (`t_end`),
//! - the fixed frame duration handed to both phases of every tick (`frame`)

#[derive(Debug, Clone)]
pub struct Parameters {
    pub t_end: f64, // time end
    pub frame: f64, // frame duration
}
