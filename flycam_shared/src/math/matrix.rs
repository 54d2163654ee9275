//! Row-major 3x3 and 4x4 matrices.
//!
//! Storage is a flat array indexed `row * N + col`:
//!
//! ```text
//! Mat3:  0 1 2     Mat4:   0  1  2  3
//!        3 4 5             4  5  6  7
//!        6 7 8             8  9 10 11
//!                         12 13 14 15
//! ```
//!
//! Vectors are columns: `M * v` multiplies each row of `M` with `v`, so the
//! translation of an affine `Mat4` lives in column 3.
//! `A * B` applied to a vector applies `B` first, then `A`.

use std::fmt;
use std::ops::{Index, IndexMut, Mul, MulAssign};

use approx::AbsDiffEq;
use serde::{Deserialize, Serialize};

use super::{ang_to_rad, Vec3, Vec4};

/// 3x3 matrix.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Mat3 {
    pub m: [f32; 9],
}

impl Default for Mat3 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mat3 {
    pub const ZERO: Self = Self { m: [0.0; 9] };
    pub const IDENTITY: Self = Self {
        m: [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0],
    };

    /// Builds a matrix from its rows, left to right, top to bottom.
    #[allow(clippy::too_many_arguments)]
    pub const fn new(
        a: f32,
        b: f32,
        c: f32,
        d: f32,
        e: f32,
        f: f32,
        g: f32,
        h: f32,
        i: f32,
    ) -> Self {
        Self {
            m: [a, b, c, d, e, f, g, h, i],
        }
    }

    pub fn from_rows(r0: Vec3, r1: Vec3, r2: Vec3) -> Self {
        Self::new(r0.x, r0.y, r0.z, r1.x, r1.y, r1.z, r2.x, r2.y, r2.z)
    }

    pub fn row(&self, row: usize) -> Vec3 {
        let base = row * 3;
        Vec3::new(self.m[base], self.m[base + 1], self.m[base + 2])
    }

    pub fn col(&self, col: usize) -> Vec3 {
        Vec3::new(self.m[col], self.m[col + 3], self.m[col + 6])
    }

    pub fn transpose(&self) -> Self {
        Self::from_rows(self.col(0), self.col(1), self.col(2))
    }
}

impl Mul<Vec3> for Mat3 {
    type Output = Vec3;

    fn mul(self, v: Vec3) -> Vec3 {
        Vec3::new(self.row(0).dot(v), self.row(1).dot(v), self.row(2).dot(v))
    }
}

impl Index<(usize, usize)> for Mat3 {
    type Output = f32;

    fn index(&self, (row, col): (usize, usize)) -> &f32 {
        &self.m[row * 3 + col]
    }
}

/// 4x4 matrix for homogeneous transforms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Mat4 {
    pub m: [f32; 16],
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mat4 {
    pub const ZERO: Self = Self { m: [0.0; 16] };
    pub const IDENTITY: Self = Self {
        m: [
            1.0, 0.0, 0.0, 0.0, //
            0.0, 1.0, 0.0, 0.0, //
            0.0, 0.0, 1.0, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ],
    };

    /// Builds a matrix from its rows, left to right, top to bottom.
    #[allow(clippy::too_many_arguments)]
    pub const fn new(
        m00: f32,
        m01: f32,
        m02: f32,
        m03: f32,
        m10: f32,
        m11: f32,
        m12: f32,
        m13: f32,
        m20: f32,
        m21: f32,
        m22: f32,
        m23: f32,
        m30: f32,
        m31: f32,
        m32: f32,
        m33: f32,
    ) -> Self {
        Self {
            m: [
                m00, m01, m02, m03, m10, m11, m12, m13, m20, m21, m22, m23, m30, m31, m32, m33,
            ],
        }
    }

    pub const fn identity() -> Self {
        Self::IDENTITY
    }

    pub fn from_rows(r0: Vec4, r1: Vec4, r2: Vec4, r3: Vec4) -> Self {
        Self::new(
            r0.x, r0.y, r0.z, r0.w, r1.x, r1.y, r1.z, r1.w, r2.x, r2.y, r2.z, r2.w, r3.x, r3.y,
            r3.z, r3.w,
        )
    }

    /// Row `row` as a vector.
    pub fn row(&self, row: usize) -> Vec4 {
        let base = row * 4;
        Vec4::new(
            self.m[base],
            self.m[base + 1],
            self.m[base + 2],
            self.m[base + 3],
        )
    }

    /// Column `col` as a vector.
    pub fn col(&self, col: usize) -> Vec4 {
        Vec4::new(
            self.m[col],
            self.m[col + 4],
            self.m[col + 8],
            self.m[col + 12],
        )
    }

    pub fn transpose(&self) -> Self {
        Self::from_rows(self.col(0), self.col(1), self.col(2), self.col(3))
    }

    /// Identity with column 3 set to `(x, y, z)`.
    pub const fn translation(x: f32, y: f32, z: f32) -> Self {
        Self::new(
            1.0, 0.0, 0.0, x, //
            0.0, 1.0, 0.0, y, //
            0.0, 0.0, 1.0, z, //
            0.0, 0.0, 0.0, 1.0,
        )
    }

    pub fn rotate_x(degrees: f32) -> Self {
        Self::rotate_x_rads(ang_to_rad(degrees))
    }

    pub fn rotate_x_rads(rads: f32) -> Self {
        let (s, c) = rads.sin_cos();
        Self::new(
            1.0, 0.0, 0.0, 0.0, //
            0.0, c, -s, 0.0, //
            0.0, s, c, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        )
    }

    pub fn rotate_y(degrees: f32) -> Self {
        Self::rotate_y_rads(ang_to_rad(degrees))
    }

    pub fn rotate_y_rads(rads: f32) -> Self {
        let (s, c) = rads.sin_cos();
        Self::new(
            c, 0.0, s, 0.0, //
            0.0, 1.0, 0.0, 0.0, //
            -s, 0.0, c, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        )
    }

    pub fn rotate_z(degrees: f32) -> Self {
        Self::rotate_z_rads(ang_to_rad(degrees))
    }

    pub fn rotate_z_rads(rads: f32) -> Self {
        let (s, c) = rads.sin_cos();
        Self::new(
            c, -s, 0.0, 0.0, //
            s, c, 0.0, 0.0, //
            0.0, 0.0, 1.0, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// The rotation/scale block.
    pub fn upper_left(&self) -> Mat3 {
        Mat3::from_rows(
            self.row(0).truncate(),
            self.row(1).truncate(),
            self.row(2).truncate(),
        )
    }

    /// Transforms a point (`w = 1`), no perspective divide.
    pub fn transform_point(&self, p: Vec3) -> Vec3 {
        (*self * p.extend(1.0)).truncate()
    }

    /// Transforms a direction (`w = 0`), ignoring translation.
    pub fn transform_vector(&self, v: Vec3) -> Vec3 {
        (*self * v.extend(0.0)).truncate()
    }

    /// The 16 floats in row-major order.
    pub fn as_array(&self) -> &[f32; 16] {
        &self.m
    }

    /// The 16 floats in column-major order, the layout GL expects when
    /// uploading without the transpose flag.
    pub fn to_cols_array(&self) -> [f32; 16] {
        self.transpose().m
    }
}

impl Mul<Vec4> for Mat4 {
    type Output = Vec4;

    fn mul(self, v: Vec4) -> Vec4 {
        Vec4::new(
            self.row(0).dot(v),
            self.row(1).dot(v),
            self.row(2).dot(v),
            self.row(3).dot(v),
        )
    }
}

impl Mul for Mat4 {
    type Output = Mat4;

    fn mul(self, rhs: Mat4) -> Mat4 {
        let mut out = [0.0f32; 16];
        for (index, cell) in out.iter_mut().enumerate() {
            let (row, col) = (index / 4, index % 4);
            *cell = (0..4).map(|k| self.m[row * 4 + k] * rhs.m[k * 4 + col]).sum();
        }
        Mat4 { m: out }
    }
}

impl MulAssign for Mat4 {
    fn mul_assign(&mut self, rhs: Mat4) {
        *self = *self * rhs;
    }
}

impl Index<(usize, usize)> for Mat4 {
    type Output = f32;

    fn index(&self, (row, col): (usize, usize)) -> &f32 {
        &self.m[row * 4 + col]
    }
}

impl IndexMut<(usize, usize)> for Mat4 {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut f32 {
        &mut self.m[row * 4 + col]
    }
}

impl AbsDiffEq for Mat4 {
    type Epsilon = f32;

    fn default_epsilon() -> f32 {
        f32::EPSILON
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f32) -> bool {
        self.m
            .iter()
            .zip(other.m.iter())
            .all(|(a, b)| a.abs_diff_eq(b, epsilon))
    }
}

impl AbsDiffEq for Mat3 {
    type Epsilon = f32;

    fn default_epsilon() -> f32 {
        f32::EPSILON
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f32) -> bool {
        self.m
            .iter()
            .zip(other.m.iter())
            .all(|(a, b)| a.abs_diff_eq(b, epsilon))
    }
}

impl fmt::Display for Mat3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = &self.m;
        write!(
            f,
            "[{:.6}, {:.6}, {:.6}\n {:.6}, {:.6}, {:.6}\n {:.6}, {:.6}, {:.6}]",
            m[0], m[1], m[2], m[3], m[4], m[5], m[6], m[7], m[8]
        )
    }
}

impl fmt::Display for Mat4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for row in 0..4 {
            if row > 0 {
                write!(f, "\n ")?;
            }
            let r = self.row(row);
            write!(f, "{:.6}, {:.6}, {:.6}, {:.6}", r.x, r.y, r.z, r.w)?;
        }
        write!(f, "]")
    }
}
