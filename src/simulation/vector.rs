//! 3D vector algebra for the particle engine
//!
//! `Vector3` wraps an nalgebra `Vector3<f64>` and offers every mutating
//! operation in two forms:
//! - in-place (`scale`, `accumulate`, `add_scaled`, ...) for per-frame hot paths,
//! - copy-returning (`scaled`, `added`, `with_added_scaled`, ...) for call
//!   sites that must leave the receiver untouched.

use std::fmt;
use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use super::error::PhysicsError;

pub type NVec3 = nalgebra::Vector3<f64>;

/// Components below this magnitude are flushed to zero by [`Vector3::cross`]
pub const EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vector3(NVec3);

impl Vector3 {
    pub const ZERO: Self = Self(NVec3::new(0.0, 0.0, 0.0));

    #[inline]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self(NVec3::new(x, y, z))
    }

    #[inline]
    pub fn x(&self) -> f64 {
        self.0.x
    }

    #[inline]
    pub fn y(&self) -> f64 {
        self.0.y
    }

    #[inline]
    pub fn z(&self) -> f64 {
        self.0.z
    }

    pub fn to_array(self) -> [f64; 3] {
        [self.0.x, self.0.y, self.0.z]
    }

    // ---------------------------------------------------------------------
    // In-place operations
    // ---------------------------------------------------------------------

    /// v *= k
    #[inline]
    pub fn scale(&mut self, k: f64) {
        self.0 *= k;
    }

    /// v += s
    #[inline]
    pub fn accumulate(&mut self, s: Vector3) {
        self.0 += s.0;
    }

    /// v -= s
    #[inline]
    pub fn subtract(&mut self, s: Vector3) {
        self.0 -= s.0;
    }

    /// v += s * k
    #[inline]
    pub fn add_scaled(&mut self, s: Vector3, k: f64) {
        self.0 += s.0 * k;
    }

    /// Hadamard product in place: v[i] *= s[i]
    #[inline]
    pub fn component_product_update(&mut self, s: Vector3) {
        self.0.component_mul_assign(&s.0);
    }

    /// Flip the sign of every component
    #[inline]
    pub fn invert(&mut self) {
        self.0 = -self.0;
    }

    // ---------------------------------------------------------------------
    // Copy-returning operations
    // ---------------------------------------------------------------------

    #[inline]
    pub fn scaled(self, k: f64) -> Vector3 {
        Self(self.0 * k)
    }

    #[inline]
    pub fn added(self, s: Vector3) -> Vector3 {
        Self(self.0 + s.0)
    }

    #[inline]
    pub fn subtracted(self, s: Vector3) -> Vector3 {
        Self(self.0 - s.0)
    }

    #[inline]
    pub fn with_added_scaled(self, s: Vector3, k: f64) -> Vector3 {
        Self(self.0 + s.0 * k)
    }

    #[inline]
    pub fn component_product(self, s: Vector3) -> Vector3 {
        Self(self.0.component_mul(&s.0))
    }

    #[inline]
    pub fn inverted(self) -> Vector3 {
        Self(-self.0)
    }

    // ---------------------------------------------------------------------
    // Products and norms
    // ---------------------------------------------------------------------

    #[inline]
    pub fn dot(self, s: Vector3) -> f64 {
        self.0.dot(&s.0)
    }

    /// Cross product with sub-`EPSILON` components flushed to zero
    pub fn cross(self, s: Vector3) -> Vector3 {
        let c = self.0.cross(&s.0).map(|v| if v.abs() < EPSILON { 0.0 } else { v });
        Self(c)
    }

    #[inline]
    pub fn magnitude(self) -> f64 {
        self.0.norm()
    }

    #[inline]
    pub fn magnitude_squared(self) -> f64 {
        self.0.norm_squared()
    }

    /// Unit vector in the same direction, or zero for a zero-length input
    pub fn normalize(self) -> Vector3 {
        let n = self.magnitude();
        if n > 0.0 {
            Self(self.0 / n)
        } else {
            Self::ZERO
        }
    }
}

/// Build three mutually orthogonal unit vectors from `a` and `b`
///
/// Returns `(a', b', c')` where `a'` is `a` normalized, `c'` is normal to the
/// plane of `a` and `b`, and `b'` completes the right-handed basis.
pub fn make_orthonormal_basis(
    a: Vector3,
    b: Vector3,
) -> Result<(Vector3, Vector3, Vector3), PhysicsError> {
    let norm_a = a.normalize();
    let c = norm_a.cross(b);

    if c.magnitude_squared() == 0.0 {
        return Err(PhysicsError::parallel_basis_vectors());
    }

    let norm_c = c.normalize();
    let norm_b = norm_c.cross(norm_a);

    Ok((norm_a, norm_b, norm_c))
}

#[inline]
pub fn deg_to_rad(degrees: f64) -> f64 {
    degrees.to_radians()
}

#[inline]
pub fn rad_to_deg(radians: f64) -> f64 {
    radians.to_degrees()
}

impl Default for Vector3 {
    fn default() -> Self {
        Self::ZERO
    }
}

impl From<[f64; 3]> for Vector3 {
    fn from(arr: [f64; 3]) -> Self {
        Self::new(arr[0], arr[1], arr[2])
    }
}

impl From<NVec3> for Vector3 {
    fn from(v: NVec3) -> Self {
        Self(v)
    }
}

impl From<Vector3> for NVec3 {
    fn from(v: Vector3) -> Self {
        v.0
    }
}

impl fmt::Display for Vector3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.4}, {:.4}, {:.4})", self.0.x, self.0.y, self.0.z)
    }
}

impl Add for Vector3 {
    type Output = Vector3;

    fn add(self, rhs: Vector3) -> Vector3 {
        self.added(rhs)
    }
}

impl AddAssign for Vector3 {
    fn add_assign(&mut self, rhs: Vector3) {
        self.accumulate(rhs);
    }
}

impl Sub for Vector3 {
    type Output = Vector3;

    fn sub(self, rhs: Vector3) -> Vector3 {
        self.subtracted(rhs)
    }
}

impl SubAssign for Vector3 {
    fn sub_assign(&mut self, rhs: Vector3) {
        self.subtract(rhs);
    }
}

impl Mul<f64> for Vector3 {
    type Output = Vector3;

    fn mul(self, k: f64) -> Vector3 {
        self.scaled(k)
    }
}

impl Mul<Vector3> for f64 {
    type Output = Vector3;

    fn mul(self, v: Vector3) -> Vector3 {
        v.scaled(self)
    }
}

impl MulAssign<f64> for Vector3 {
    fn mul_assign(&mut self, k: f64) {
        self.scale(k);
    }
}

impl Neg for Vector3 {
    type Output = Vector3;

    fn neg(self) -> Vector3 {
        self.inverted()
    }
}
