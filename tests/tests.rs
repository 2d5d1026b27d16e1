use pmsim::{Arena, ForceKind, ForceRegistry, Gravity, Particle, PhysicsError, Uplift, Vector3};
use pmsim::{DampingPolicy, Drag, Simulation, ScenarioConfig};

/// Particle at (1,0,0) moving up at 1 m/s under constant -9.8 m/s^2, damping 0.99, mass 1
pub fn falling_particle() -> Particle {
    Particle::with_mass(
        Vector3::new(1.0, 0.0, 0.0),
        Vector3::new(0.0, 1.0, 0.0),
        Vector3::new(0.0, -9.8, 0.0),
        0.99,
        1.0,
    )
}

/// Particle of mass `m` at rest at `x`, no constant acceleration, no damping
pub fn resting_particle(x: Vector3, m: f64) -> Particle {
    Particle::with_mass(x, Vector3::ZERO, Vector3::ZERO, 1.0, m)
}

pub fn assert_close(a: Vector3, b: Vector3, tol: f64) {
    assert!((a - b).magnitude() < tol, "expected {b}, got {a}");
}

// ==================================================================================
// Integrator tests
// ==================================================================================

#[test]
fn integrate_one_second_end_to_end() {
    let mut p = falling_particle();
    p.integrate(1.0).unwrap();

    assert_close(p.position, Vector3::new(1.0, 1.0, 0.0), 1e-12);
    // (1 + -9.8 * 1) * 0.99^1
    assert_close(p.velocity, Vector3::new(0.0, -8.712, 0.0), 1e-9);
}

#[test]
fn integrate_frame_order_is_position_then_velocity() {
    let mut p = falling_particle();
    let v_old = p.velocity;
    let x_old = p.position;
    p.integrate(0.016).unwrap();

    let x_expected = x_old + v_old * 0.016;
    let v_expected = (v_old + Vector3::new(0.0, -9.8, 0.0) * 0.016) * 0.99f64.powf(0.016);
    assert_close(p.position, x_expected, 1e-15);
    assert_close(p.velocity, v_expected, 1e-15);

    // using the new velocity for the position step would land somewhere else
    let x_wrong = x_old + p.velocity * 0.016;
    assert!((p.position - x_wrong).magnitude() > 1e-4);
}

#[test]
fn integrate_infinite_mass_fails_untouched() {
    let mut p = Particle::with_inverse_mass(
        Vector3::new(1.0, 2.0, 3.0),
        Vector3::new(4.0, 5.0, 6.0),
        Vector3::new(0.0, -9.8, 0.0),
        0.9,
        0.0,
    );
    p.add_force(Vector3::new(1.0, 0.0, 0.0));
    let before = p.clone();

    assert_eq!(p.integrate(0.016), Err(PhysicsError::InfiniteMassIntegration));
    assert_eq!(p, before);
}

#[test]
fn integrate_negative_duration_fails_untouched() {
    let mut p = falling_particle();
    p.add_force(Vector3::new(0.0, 3.0, 0.0));
    let before = p.clone();

    assert_eq!(
        p.integrate(-0.1),
        Err(PhysicsError::InvalidDuration { duration: -0.1 })
    );
    assert_eq!(p, before);
}

#[test]
fn integrate_zero_duration_is_a_consistent_no_op() {
    for policy in [DampingPolicy::Exponential, DampingPolicy::PerFrame] {
        let mut p = falling_particle();
        p.add_force(Vector3::new(0.0, 3.0, 0.0));
        assert_eq!(p.integrate_with(0.0, policy), Ok(()));
        assert_eq!(p.position, falling_particle().position);
        assert_eq!(p.velocity, falling_particle().velocity);
        assert_eq!(p.accumulated_force(), Vector3::ZERO);
    }
}

#[test]
fn integrate_consumes_accumulated_force() {
    let mut p = resting_particle(Vector3::ZERO, 2.0);
    p.add_force(Vector3::new(4.0, 0.0, 0.0));
    p.integrate(0.5).unwrap();

    // a = F/m = 2, v = a*dt = 1, position uses the old (zero) velocity
    assert_close(p.velocity, Vector3::new(1.0, 0.0, 0.0), 1e-12);
    assert_eq!(p.position, Vector3::ZERO);
    assert_eq!(p.accumulated_force(), Vector3::ZERO);
}

#[test]
fn per_frame_damping_depends_on_frame_rate() {
    let mut one_step = falling_particle();
    one_step.integrate(1.0).unwrap();

    let mut two_steps = falling_particle();
    two_steps.integrate_with(0.5, DampingPolicy::PerFrame).unwrap();
    two_steps.integrate_with(0.5, DampingPolicy::PerFrame).unwrap();

    assert!((one_step.velocity - two_steps.velocity).magnitude() > 1e-6);
}

// ==================================================================================
// Force generator tests
// ==================================================================================

#[test]
fn gravity_adds_weight_once() {
    let mut particles = Arena::new();
    let mut generators = Arena::new();
    let p = particles.insert(resting_particle(Vector3::ZERO, 4.0));
    let g = generators.insert(ForceKind::from(Gravity::new(Vector3::new(0.0, -10.0, 0.0))));

    let mut registry = ForceRegistry::new();
    registry.add(p, g);
    registry.update_forces(0.016, &mut particles, &generators);

    assert_eq!(particles.get(p).unwrap().accumulated_force(), Vector3::new(0.0, -40.0, 0.0));
}

#[test]
fn gravity_skips_infinite_mass() {
    let mut particles = Arena::new();
    let mut generators = Arena::new();
    let wall = particles.insert(Particle::default());
    let g = generators.insert(ForceKind::from(Gravity::new(Vector3::new(0.0, -10.0, 0.0))));

    let mut registry = ForceRegistry::new();
    registry.add(wall, g);
    registry.update_forces(0.016, &mut particles, &generators);

    assert_eq!(particles.get(wall).unwrap().accumulated_force(), Vector3::ZERO);
}

#[test]
fn uplift_fades_with_horizontal_distance() {
    let mut particles = Arena::new();
    let mut generators = Arena::new();
    let inside = particles.insert(resting_particle(Vector3::new(3.0, 0.0, 4.0), 1.0));
    let edge = particles.insert(resting_particle(Vector3::new(10.0, 0.0, 0.0), 1.0));
    let outside = particles.insert(resting_particle(Vector3::new(8.0, 0.0, 8.0), 1.0));
    let up = generators.insert(ForceKind::from(Uplift::new(Vector3::ZERO, 10.0, 5.0)));

    let mut registry = ForceRegistry::new();
    for p in [inside, edge, outside] {
        registry.add(p, up);
    }
    registry.update_forces(0.016, &mut particles, &generators);

    assert_eq!(particles.get(inside).unwrap().accumulated_force(), Vector3::new(0.0, 2.5, 0.0));
    assert_eq!(particles.get(edge).unwrap().accumulated_force(), Vector3::ZERO);
    assert_eq!(particles.get(outside).unwrap().accumulated_force(), Vector3::ZERO);
}

// ==================================================================================
// Registry tests
// ==================================================================================

#[test]
fn remove_missing_pair_is_a_no_op() {
    let mut particles = Arena::new();
    let mut generators = Arena::new();
    let p = particles.insert(resting_particle(Vector3::ZERO, 1.0));
    let g = generators.insert(ForceKind::from(Drag::new(0.1, 0.1)));
    let other = generators.insert(ForceKind::from(Drag::new(0.1, 0.1)));

    let mut registry = ForceRegistry::new();
    assert!(!registry.remove(p, g));

    registry.add(p, g);
    assert!(!registry.remove(p, other));
    assert_eq!(registry.len(), 1);
}

#[test]
fn duplicate_registrations_both_fire() {
    let mut particles = Arena::new();
    let mut generators = Arena::new();
    let p = particles.insert(resting_particle(Vector3::ZERO, 1.0));
    let g = generators.insert(ForceKind::from(Gravity::new(Vector3::new(0.0, -1.0, 0.0))));

    let mut registry = ForceRegistry::new();
    registry.add(p, g);
    registry.add(p, g);
    registry.update_forces(0.016, &mut particles, &generators);

    assert_eq!(particles.get(p).unwrap().accumulated_force(), Vector3::new(0.0, -2.0, 0.0));
}

#[test]
fn clear_leaves_particles_and_generators_alone() {
    let mut particles = Arena::new();
    let mut generators = Arena::new();
    let p = particles.insert(resting_particle(Vector3::ZERO, 1.0));
    let g = generators.insert(ForceKind::from(Gravity::new(Vector3::new(0.0, -1.0, 0.0))));

    let mut registry = ForceRegistry::new();
    registry.add(p, g);
    registry.clear();

    assert!(registry.is_empty());
    assert!(particles.contains(p));
    assert!(generators.contains(g));
}

// ==================================================================================
// Frame loop tests
// ==================================================================================

fn run_frames(durations: &[f64]) -> (Vector3, Vector3) {
    let mut particles = Arena::new();
    let mut generators = Arena::new();
    let p = particles.insert(falling_particle());
    let g = generators.insert(ForceKind::from(Gravity::new(Vector3::new(0.0, -9.81, 0.0))));
    let d = generators.insert(ForceKind::from(Drag::new(0.3, 0.1)));
    let u = generators.insert(ForceKind::from(Uplift::new(Vector3::ZERO, 2.0, 12.0)));

    let mut registry = ForceRegistry::new();
    registry.add(p, g);
    registry.add(p, d);
    registry.add(p, u);

    for &dt in durations {
        registry.update_forces(dt, &mut particles, &generators);
        particles.get_mut(p).unwrap().integrate(dt).unwrap();
    }
    let out = particles.get(p).unwrap();
    (out.position, out.velocity)
}

#[test]
fn fixed_frame_sequence_is_bit_identical() {
    let durations = [0.016, 0.017, 0.015, 0.033, 0.001, 0.016, 0.02];
    let a = run_frames(&durations);
    let b = run_frames(&durations);
    assert_eq!(a.0.to_array(), b.0.to_array());
    assert_eq!(a.1.to_array(), b.1.to_array());
}

#[test]
fn scenario_file_runs_to_completion() {
    let yaml = include_str!("../scenarios/frame_rate.yaml");
    let cfg: ScenarioConfig = serde_yaml::from_str(yaml).unwrap();
    let mut sim = Simulation::build_scenario(cfg).unwrap();

    assert_eq!(sim.run().unwrap(), 2);

    // per-frame damping applied twice: ((1 - 4.9) * 0.99 - 4.9) * 0.99
    let (_, p) = sim.particles.iter().next().unwrap();
    let expected_vy = ((1.0 - 4.9) * 0.99 - 4.9) * 0.99;
    assert!((p.velocity.y() - expected_vy).abs() < 1e-9);
}

#[test]
fn default_scenario_parses_and_runs() {
    let yaml = include_str!("../scenarios/test_file.yaml");
    let cfg: ScenarioConfig = serde_yaml::from_str(yaml).unwrap();
    let mut sim = Simulation::build_scenario(cfg).unwrap();

    assert_eq!(sim.particles.len(), 3);
    assert_eq!(sim.registry.len(), 6);
    assert!(sim.run().unwrap() > 0);
}
