pub mod vector;
pub mod error;
pub mod arena;
pub mod states;
pub mod params;
pub mod engine;
pub mod forces;
pub mod integrator;
pub mod registry;
pub mod scenario;
pub mod ballistic;
