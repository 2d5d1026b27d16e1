//! Damping comparison harness and a small stepping benchmark
//!
//! `compare_damping` flies two identical particles through the same
//! randomized frame sequence, one damped per frame (`velocity *= d`) and one
//! damped per second (`velocity *= d^dt`), and reports how far their
//! velocities drift apart on average. With variable frame times the
//! per-frame policy applies drag at a rate that depends on frame rate.

use std::time::Instant;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

use crate::simulation::engine::Engine;
use crate::simulation::error::PhysicsError;
use crate::simulation::forces::{Drag, Gravity, Uplift};
use crate::simulation::params::Parameters;
use crate::simulation::scenario::Simulation;
use crate::simulation::states::{DampingPolicy, Particle};
use crate::simulation::vector::Vector3;

/// Knobs for one comparison run
#[derive(Debug, Clone)]
pub struct CompareParams {
    pub duration: f64, // simulated seconds per run
    pub min_frame: f64, // shortest random frame
    pub max_frame: f64, // longest random frame
    pub runs: usize, // number of independent runs averaged together
    pub gravity: Vector3, // constant acceleration on both particles
    pub damping: f64,
}

impl Default for CompareParams {
    fn default() -> Self {
        Self {
            duration: 5.0,
            min_frame: 0.01,
            max_frame: 0.03,
            runs: 1,
            gravity: Vector3::new(0.0, 15.0, 0.0),
            damping: 0.99,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompareReport {
    pub mean_difference: f64, // |v_per_frame - v_exponential| averaged over every frame of every run
    pub final_difference: f64, // same, at the end of the last run
    pub frames: usize, // total frames simulated across all runs
}

fn comparison_particle(p: &CompareParams) -> Particle {
    Particle::with_mass(
        Vector3::new(1.0, 0.0, 0.0),
        Vector3::new(0.0, 1.0, 0.0),
        p.gravity,
        p.damping,
        1.0,
    )
}

/// Run the damping comparison with frame times drawn from `rng`
pub fn compare_damping<R: Rng>(p: &CompareParams, rng: &mut R) -> Result<CompareReport, PhysicsError> {
    // a non-positive frame range would never reach `duration`
    if p.min_frame.is_nan() || p.min_frame <= 0.0 || p.max_frame < p.min_frame {
        return Err(PhysicsError::invalid_duration(p.min_frame));
    }

    let mut total_diff = 0.0;
    let mut frames = 0;
    let mut final_difference = 0.0;

    for _ in 0..p.runs {
        let mut per_frame = comparison_particle(p);
        let mut exponential = comparison_particle(p);
        let mut elapsed = 0.0;

        while elapsed < p.duration {
            // uniform in [min_frame, max_frame), clipped so the run ends exactly at `duration`
            let mut frame = p.min_frame + rng.gen::<f64>() * (p.max_frame - p.min_frame);
            if elapsed + frame > p.duration {
                frame = p.duration - elapsed;
            }

            per_frame.integrate_with(frame, DampingPolicy::PerFrame)?;
            exponential.integrate_with(frame, DampingPolicy::Exponential)?;

            final_difference = (per_frame.velocity - exponential.velocity).magnitude();
            total_diff += final_difference;
            frames += 1;
            elapsed += frame;
        }
    }

    let mean_difference = if frames == 0 { 0.0 } else { total_diff / frames as f64 };
    info!(mean_difference, final_difference, frames, "damping comparison done");

    Ok(CompareReport {
        mean_difference,
        final_difference,
        frames,
    })
}

/// Seeded convenience wrapper so runs are reproducible
pub fn compare_damping_seeded(p: &CompareParams, seed: u64) -> Result<CompareReport, PhysicsError> {
    let mut rng = StdRng::seed_from_u64(seed);
    compare_damping(p, &mut rng)
}

/// Helper to build a simulation with `n` particles, each under gravity, drag and uplift
fn make_simulation(n: usize) -> Simulation {
    let mut sim = Simulation::new(Engine::default(), Parameters { t_end: 1.0, frame: 0.016 });

    let gravity = sim.add_generator(Gravity::new(Vector3::new(0.0, -9.81, 0.0)));
    let drag = sim.add_generator(Drag::new(0.1, 0.01));
    let uplift = sim.add_generator(Uplift::new(Vector3::ZERO, 5.0, 20.0));

    for i in 0..n {
        let i_f = i as f64;
        // deterministic positions, no rand needed
        let x = Vector3::new(
            (i_f * 0.37).sin() * 5.0,
            (i_f * 0.13).cos() * 5.0,
            (i_f * 0.07).sin() * 5.0,
        );
        let p = sim.add_particle(Particle::with_mass(x, Vector3::ZERO, Vector3::ZERO, 0.99, 1.0));
        sim.registry.add(p, gravity);
        sim.registry.add(p, drag);
        sim.registry.add(p, uplift);
    }
    sim
}

/// Time accumulate + integrate for a range of particle counts
/// Paste output directly into a spreadsheet to graph
pub fn bench_step_curve() -> Result<(), PhysicsError> {
    println!("N,step_ms");

    for n in (1000..=16000).step_by(1000) {
        let steps = 20;
        let mut sim = make_simulation(n);

        // Warm-up one step
        sim.step(0.016)?;

        let t0 = Instant::now();
        for _ in 0..steps {
            sim.step(0.016)?;
        }
        let ms = t0.elapsed().as_secs_f64() * 1000.0 / steps as f64;

        println!("{},{:.6}", n, ms);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_report() {
        let p = CompareParams::default();
        let a = compare_damping_seeded(&p, 7).unwrap();
        let b = compare_damping_seeded(&p, 7).unwrap();
        assert_eq!(a, b);
        assert!(a.frames > 0);
    }

    #[test]
    fn policies_diverge_under_variable_frames() {
        let report = compare_damping_seeded(&CompareParams::default(), 42).unwrap();
        assert!(report.mean_difference > 0.0);
        assert!(report.final_difference > 0.0);
    }

    #[test]
    fn rejects_empty_frame_range() {
        let p = CompareParams {
            min_frame: 0.0,
            ..CompareParams::default()
        };
        assert!(compare_damping_seeded(&p, 1).is_err());
    }

    #[test]
    fn no_damping_means_no_divergence() {
        let p = CompareParams {
            damping: 1.0,
            runs: 3,
            ..CompareParams::default()
        };
        let report = compare_damping_seeded(&p, 1).unwrap();
        assert_eq!(report.mean_difference, 0.0);
    }

    #[test]
    fn bench_simulation_wires_every_particle() {
        let sim = make_simulation(10);
        assert_eq!(sim.particles.len(), 10);
        assert_eq!(sim.registry.len(), 30);
    }
}
