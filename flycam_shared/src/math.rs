//! Math types.
//!
//! Vectors, row-major matrices, quaternions and the view/projection
//! transforms built on them. Everything is `Copy`, allocation-free and
//! single precision. Public angles are in degrees; `_rads` variants take
//! radians.

mod matrix;
mod quat;
mod transform;
mod vector;

pub use matrix::{Mat3, Mat4};
pub use quat::Quat;
pub use transform::{look_at, look_at_euler, perspective, translation_matrix, view_matrix};
pub use vector::{Vec2, Vec3, Vec4};

use std::f32::consts::PI;

/// Degenerate input to an operation that needs a direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MathError {
    /// Normalizing or inverting something of zero (or non-finite) length.
    #[error("cannot normalize a zero-length value")]
    ZeroLength,
    /// `look_at` with the camera on top of its target.
    #[error("look-at target coincides with the camera position")]
    DegenerateLookAt,
}

pub fn ang_to_rad(degrees: f32) -> f32 {
    degrees * (PI / 180.0)
}

pub fn rad_to_ang(rads: f32) -> f32 {
    rads * (180.0 / PI)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn angle_conversions() {
        assert_eq!(ang_to_rad(180.0), PI);
        assert!((rad_to_ang(PI / 2.0) - 90.0).abs() < 1e-5);
        assert!((rad_to_ang(ang_to_rad(37.5)) - 37.5).abs() < 1e-4);
    }
}
