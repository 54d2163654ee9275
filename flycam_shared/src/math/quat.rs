//! Quaternions for camera orientation.
//!
//! Components are stored scalar-first (`w, x, y, z`). Nothing here
//! normalizes implicitly: products and angle/axis constructors may drift away
//! from unit length, and callers decide when to call [`Quat::normalize`].

use std::fmt;
use std::ops::{Div, Mul, MulAssign};

use approx::AbsDiffEq;
use serde::{Deserialize, Serialize};

use super::{ang_to_rad, Mat4, MathError, Vec3};

/// Squared norms in `[1.0, NEAR_UNIT_MAX]` count as already normalized, and
/// dot products in the same range count as identical orientations in slerp.
const NEAR_UNIT_MAX: f32 = 1.001;

/// Below this `sin(Ω)` slerp falls back to linear interpolation.
const SLERP_MIN_SIN: f32 = 0.001;

/// Quaternion `w + xi + yj + zk`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quat {
    pub w: f32,
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Default for Quat {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Quat {
    pub const IDENTITY: Self = Self::new(1.0, 0.0, 0.0, 0.0);
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    /// Raw components, scalar first.
    pub const fn new(w: f32, x: f32, y: f32, z: f32) -> Self {
        Self { w, x, y, z }
    }

    /// Rotation of `degrees` around `axis`.
    ///
    /// `w = cos(θ/2)`, `(x, y, z) = sin(θ/2) * axis`. The axis is used as
    /// given, so a non-unit axis yields a non-unit quaternion.
    pub fn from_angle_axis(degrees: f32, axis: Vec3) -> Self {
        Self::from_angle_xyz(degrees, axis.x, axis.y, axis.z)
    }

    /// Same as [`Quat::from_angle_axis`] with the axis as three scalars.
    pub fn from_angle_xyz(degrees: f32, x: f32, y: f32, z: f32) -> Self {
        let (s, c) = (ang_to_rad(degrees) * 0.5).sin_cos();
        Self::new(c, s * x, s * y, s * z)
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.w, self.x, self.y, self.z]
    }

    pub fn dot(self, rhs: Self) -> f32 {
        self.w * rhs.w + self.x * rhs.x + self.y * rhs.y + self.z * rhs.z
    }

    /// Squared length `w² + x² + y² + z²`.
    pub fn norm(self) -> f32 {
        self.dot(self)
    }

    pub fn conjugate(self) -> Self {
        Self::new(self.w, -self.x, -self.y, -self.z)
    }

    /// `conjugate / norm`; valid for non-unit quaternions too.
    pub fn inverse(self) -> Result<Self, MathError> {
        let n = self.norm();
        if n == 0.0 {
            return Err(MathError::ZeroLength);
        }
        Ok(self.conjugate() / n)
    }

    /// Scales to unit length. Quaternions whose squared norm already sits in
    /// `[1.0, 1.001]` are returned untouched.
    pub fn normalize(self) -> Result<Self, MathError> {
        let n = self.norm();
        if (1.0..=NEAR_UNIT_MAX).contains(&n) {
            return Ok(self);
        }
        if n == 0.0 || !n.is_finite() {
            return Err(MathError::ZeroLength);
        }
        Ok(self / n.sqrt())
    }

    /// Spherical linear interpolation from `self` (t = 0) to `to` (t = 1)
    /// along the shorter arc.
    pub fn slerp(self, to: Self, t: f32) -> Self {
        let mut from = self;
        let mut d = from.dot(to);
        if d < 0.0 {
            from = from.scale(-1.0);
            d = -d;
        }

        if (1.0..=NEAR_UNIT_MAX).contains(&d) {
            return from;
        }

        let d = d.clamp(-1.0, 1.0);
        let sin_omega = (1.0 - d * d).sqrt();
        if sin_omega.abs() < SLERP_MIN_SIN {
            return from.scale(1.0 - t).add(to.scale(t));
        }

        let omega = d.acos();
        let a = ((1.0 - t) * omega).sin() / sin_omega;
        let b = (t * omega).sin() / sin_omega;
        from.scale(a).add(to.scale(b))
    }

    /// Rotation matrix for this quaternion, embedded in an identity 4x4.
    ///
    /// The result is only a pure rotation when `self` is a unit quaternion.
    pub fn to_rotation_matrix(self) -> Mat4 {
        let Self { w, x, y, z } = self;
        let mut m = Mat4::IDENTITY;
        m.m[0] = 1.0 - 2.0 * y * y - 2.0 * z * z;
        m.m[1] = 2.0 * x * y - 2.0 * w * z;
        m.m[2] = 2.0 * x * z + 2.0 * w * y;
        m.m[4] = 2.0 * x * y + 2.0 * w * z;
        m.m[5] = 1.0 - 2.0 * x * x - 2.0 * z * z;
        m.m[6] = 2.0 * y * z - 2.0 * w * x;
        m.m[8] = 2.0 * x * z - 2.0 * w * y;
        m.m[9] = 2.0 * y * z + 2.0 * w * x;
        m.m[10] = 1.0 - 2.0 * x * x - 2.0 * y * y;
        m
    }

    /// Rotates `v` by this quaternion.
    pub fn rotate(self, v: Vec3) -> Vec3 {
        self.to_rotation_matrix().transform_vector(v)
    }

    fn scale(self, s: f32) -> Self {
        Self::new(self.w * s, self.x * s, self.y * s, self.z * s)
    }

    fn add(self, rhs: Self) -> Self {
        Self::new(
            self.w + rhs.w,
            self.x + rhs.x,
            self.y + rhs.y,
            self.z + rhs.z,
        )
    }
}

impl From<Quat> for Mat4 {
    fn from(q: Quat) -> Self {
        q.to_rotation_matrix()
    }
}

/// Hamilton product. `a * b` rotates by `b` first, then by `a`.
impl Mul for Quat {
    type Output = Quat;

    fn mul(self, o: Quat) -> Quat {
        Quat::new(
            self.w * o.w - self.x * o.x - self.y * o.y - self.z * o.z,
            self.x * o.w + self.w * o.x - self.z * o.y + self.y * o.z,
            self.y * o.w + self.z * o.x + self.w * o.y - self.x * o.z,
            self.z * o.w - self.y * o.x + self.x * o.y + self.w * o.z,
        )
    }
}

impl MulAssign for Quat {
    fn mul_assign(&mut self, rhs: Quat) {
        *self = *self * rhs;
    }
}

impl Div<f32> for Quat {
    type Output = Quat;

    fn div(self, s: f32) -> Quat {
        Quat::new(self.w / s, self.x / s, self.y / s, self.z / s)
    }
}

impl AbsDiffEq for Quat {
    type Epsilon = f32;

    fn default_epsilon() -> f32 {
        f32::EPSILON
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f32) -> bool {
        self.w.abs_diff_eq(&other.w, epsilon)
            && self.x.abs_diff_eq(&other.x, epsilon)
            && self.y.abs_diff_eq(&other.y, epsilon)
            && self.z.abs_diff_eq(&other.z, epsilon)
    }
}

impl fmt::Display for Quat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{:.6}, {:.6}, {:.6}, {:.6}]",
            self.w, self.x, self.y, self.z
        )
    }
}
