//! Force generators for the point-mass engine
//!
//! A force generator looks at one particle and the frame duration and adds
//! a force into that particle's accumulator. It never overwrites the
//! accumulator and never integrates. The concrete set is closed:
//! gravity, drag, radial uplift and an air brake, gathered in [`ForceKind`].

use serde::Deserialize;

use super::states::Particle;
use super::vector::Vector3;

/// Trait for anything that contributes a force to a [`Particle`]
pub trait ForceGenerator {
    fn update_force(&self, particle: &mut Particle, duration: f64);
}

/// Constant gravitational field. Contributes `gravity * mass`
#[derive(Debug, Clone, PartialEq)]
pub struct Gravity {
    pub gravity: Vector3,
}

impl Gravity {
    pub fn new(gravity: Vector3) -> Self {
        Self { gravity }
    }
}

impl ForceGenerator for Gravity {
    fn update_force(&self, particle: &mut Particle, _duration: f64) {
        // Immovable particles have no meaningful weight
        if !particle.has_finite_mass() {
            return;
        }
        particle.add_force(self.gravity.scaled(particle.mass()));
    }
}

/// Which drag force law a [`Drag`] generator applies
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragLaw {
    /// `normalize(v) * (k1*s + k2*s)`: along the velocity, linear in both terms.
    /// This is the historical behaviour and does not match the intended
    /// physics; it is kept as the default so existing scenarios reproduce.
    #[default]
    #[serde(rename = "literal")]
    Literal,

    /// `-normalize(v) * (k1*s + k2*s^2)`: opposes motion, quadratic in k2
    #[serde(rename = "opposing")]
    Opposing,
}

/// Speed-dependent drag with coefficients `k1` (linear) and `k2` (quadratic)
#[derive(Debug, Clone, PartialEq)]
pub struct Drag {
    pub k1: f64,
    pub k2: f64,
    pub law: DragLaw,
}

impl Drag {
    pub fn new(k1: f64, k2: f64) -> Self {
        Self {
            k1,
            k2,
            law: DragLaw::Literal,
        }
    }

    pub fn with_law(mut self, law: DragLaw) -> Self {
        self.law = law;
        self
    }

    /// The force this generator would add for the given velocity
    pub fn force_for(&self, velocity: Vector3) -> Vector3 {
        let speed = velocity.magnitude();
        let direction = velocity.normalize();

        match self.law {
            DragLaw::Literal => {
                // TODO: k2 should multiply speed^2 and the force should oppose
                // velocity; switch the default to `Opposing` once scenarios are migrated
                let drag_coeff = self.k1 * speed + self.k2 * speed;
                direction.scaled(drag_coeff)
            }
            DragLaw::Opposing => {
                let drag_coeff = self.k1 * speed + self.k2 * speed * speed;
                direction.scaled(-drag_coeff)
            }
        }
    }
}

impl ForceGenerator for Drag {
    fn update_force(&self, particle: &mut Particle, _duration: f64) {
        particle.add_force(self.force_for(particle.velocity));
    }
}

/// Upward push over a disc on the X-Z plane
///
/// Within `radius` of `center` (horizontal distance only) the particle gets
/// `(0, force * (1 - d / radius), 0)`: full strength at the center, fading
/// linearly to nothing at the edge. Outside the disc nothing is added.
#[derive(Debug, Clone, PartialEq)]
pub struct Uplift {
    pub center: Vector3,
    pub radius: f64,
    pub force: f64,
}

impl Uplift {
    pub fn new(center: Vector3, radius: f64, force: f64) -> Self {
        Self { center, radius, force }
    }

    /// Distance from the particle to the center, ignoring height
    pub fn horizontal_distance(&self, position: Vector3) -> f64 {
        let dx = position.x() - self.center.x();
        let dz = position.z() - self.center.z();
        (dx * dx + dz * dz).sqrt()
    }
}

impl ForceGenerator for Uplift {
    fn update_force(&self, particle: &mut Particle, _duration: f64) {
        if self.radius <= 0.0 {
            return;
        }

        let distance = self.horizontal_distance(particle.position);
        if distance <= self.radius {
            let magnitude = self.force * (1.0 - distance / self.radius);
            particle.add_force(Vector3::new(0.0, magnitude, 0.0));
        }
    }
}

/// Air brake switching between two drag profiles
#[derive(Debug, Clone, PartialEq)]
pub struct AirBrake {
    pub on: bool,
    pub normal: Drag,
    pub braking: Drag,
}

impl AirBrake {
    /// Starts with the brake off
    pub fn new(normal: Drag, braking: Drag) -> Self {
        Self {
            on: false,
            normal,
            braking,
        }
    }

    pub fn set_on(&mut self, on: bool) {
        self.on = on;
    }

    pub fn is_on(&self) -> bool {
        self.on
    }

    /// The drag profile currently in effect
    pub fn active(&self) -> &Drag {
        if self.on {
            &self.braking
        } else {
            &self.normal
        }
    }
}

impl ForceGenerator for AirBrake {
    fn update_force(&self, particle: &mut Particle, duration: f64) {
        self.active().update_force(particle, duration);
    }
}

/// Every force generator the engine knows about
#[derive(Debug, Clone, PartialEq)]
pub enum ForceKind {
    Gravity(Gravity),
    Drag(Drag),
    Uplift(Uplift),
    AirBrake(AirBrake),
}

impl ForceGenerator for ForceKind {
    fn update_force(&self, particle: &mut Particle, duration: f64) {
        match self {
            ForceKind::Gravity(g) => g.update_force(particle, duration),
            ForceKind::Drag(d) => d.update_force(particle, duration),
            ForceKind::Uplift(u) => u.update_force(particle, duration),
            ForceKind::AirBrake(a) => a.update_force(particle, duration),
        }
    }
}

impl From<Gravity> for ForceKind {
    fn from(g: Gravity) -> Self {
        ForceKind::Gravity(g)
    }
}

impl From<Drag> for ForceKind {
    fn from(d: Drag) -> Self {
        ForceKind::Drag(d)
    }
}

impl From<Uplift> for ForceKind {
    fn from(u: Uplift) -> Self {
        ForceKind::Uplift(u)
    }
}

impl From<AirBrake> for ForceKind {
    fn from(a: AirBrake) -> Self {
        ForceKind::AirBrake(a)
    }
}
