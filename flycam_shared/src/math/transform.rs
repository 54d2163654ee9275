//! View and projection matrices.
//!
//! All functions return row-major [`Mat4`]s for column vectors. Upload them
//! with the transpose flag set, or use [`Mat4::to_cols_array`].

use super::{ang_to_rad, Mat4, MathError, Vec3, Vec4};

/// Identity with the translation column set to `(x, y, z)`.
pub fn translation_matrix(x: f32, y: f32, z: f32) -> Mat4 {
    Mat4::translation(x, y, z)
}

/// Combines a camera translation and rotation: `rotation * translation`.
pub fn view_matrix(translation: Mat4, rotation: Mat4) -> Mat4 {
    rotation * translation
}

/// View matrix for a camera at `pos` looking at `target`.
///
/// ```text
///  Rx  Ry  Rz  0     1 0 0 -Px
///  Ux  Uy  Uz  0  *  0 1 0 -Py
/// -Fx -Fy -Fz  0     0 0 1 -Pz
///  0   0   0   1     0 0 0  1
/// ```
///
/// `F` is the normalized direction to the target, `R = F x up` and
/// `U = R x F`. `R` is not renormalized, so `up` should be perpendicular to
/// the view direction for an orthonormal result.
pub fn look_at(pos: Vec3, target: Vec3, up: Vec3) -> Result<Mat4, MathError> {
    let forward = (target - pos)
        .normalize()
        .map_err(|_| MathError::DegenerateLookAt)?;
    let right = forward.cross(up);
    let up = right.cross(forward);

    let rotation = Mat4::from_rows(
        right.extend(0.0),
        up.extend(0.0),
        (-forward).extend(0.0),
        Vec4::new(0.0, 0.0, 0.0, 1.0),
    );
    let translation = Mat4::translation(-pos.x, -pos.y, -pos.z);
    Ok(view_matrix(translation, rotation))
}

/// View matrix from a position and `(pitch, yaw, roll)` angles in degrees.
///
/// A `+Z` view direction and a `+Y` up vector are rotated around Y by
/// `angles.y`, then around X by `angles.x`, and the result is handed to
/// [`look_at`]. Roll (`angles.z`) is not applied.
pub fn look_at_euler(pos: Vec3, angles: Vec3) -> Result<Mat4, MathError> {
    let yaw = Mat4::rotate_y(angles.y);
    let pitch = Mat4::rotate_x(angles.x);

    let direction = pitch * (yaw * Vec4::new(0.0, 0.0, 1.0, 1.0));
    let up = pitch * (yaw * Vec4::new(0.0, 1.0, 0.0, 1.0));

    look_at(pos, pos + direction.truncate(), up.truncate())
}

/// Symmetric-frustum perspective projection.
///
/// ```text
/// Px 0  0  0      range = near * tan(fov / 2)
/// 0  Py 0  0      Px = near / (range * aspect)
/// 0  0  Pz P      Py = near / range
/// 0  0 -1  0      Pz = -(far + near) / (far - near)
///                 P  = -2 * far * near / (far - near)
/// ```
///
/// `fov_degrees` is the vertical field of view and `aspect` is
/// width / height, so at an aspect of 1 the horizontal and vertical scales
/// match.
pub fn perspective(near: f32, far: f32, fov_degrees: f32, aspect: f32) -> Mat4 {
    let range = near * (ang_to_rad(fov_degrees) * 0.5).tan();
    let px = near / (range * aspect);
    let py = near / range;
    let pz = -(far + near) / (far - near);
    let p = -(2.0 * far * near) / (far - near);

    Mat4::new(
        px, 0.0, 0.0, 0.0, //
        0.0, py, 0.0, 0.0, //
        0.0, 0.0, pz, p, //
        0.0, 0.0, -1.0, 0.0,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn view_matrix_is_rotation_times_translation() {
        let t = translation_matrix(1.0, 2.0, 3.0);
        let r = Mat4::rotate_y(45.0);
        assert_eq!(view_matrix(t, r), r * t);
    }

    #[test]
    fn look_at_default_camera() {
        let view = look_at(Vec3::new(0.0, 0.0, -2.0), Vec3::ZERO, Vec3::Y).unwrap();
        assert_eq!(view.row(0), Vec4::new(-1.0, 0.0, 0.0, 0.0));
        assert_eq!(view.row(1), Vec4::new(0.0, 1.0, 0.0, 0.0));
        // Third row holds -forward; the camera looks down +Z.
        assert_eq!((-view.row(2)).truncate(), Vec3::Z);
        // The target lands on the -Z axis of view space at distance 2.
        assert_abs_diff_eq!(
            view.transform_point(Vec3::ZERO),
            Vec3::new(0.0, 0.0, -2.0),
            epsilon = 1e-6
        );
    }

    #[test]
    fn look_at_same_point_is_degenerate() {
        let p = Vec3::new(1.0, 1.0, 1.0);
        assert_eq!(look_at(p, p, Vec3::Y), Err(MathError::DegenerateLookAt));
    }

    #[test]
    fn look_at_euler_zero_angles_looks_down_z() {
        let pos = Vec3::new(1.0, 2.0, 3.0);
        let a = look_at_euler(pos, Vec3::ZERO).unwrap();
        let b = look_at(pos, pos + Vec3::Z, Vec3::Y).unwrap();
        assert_abs_diff_eq!(a, b, epsilon = 1e-6);
    }

    #[test]
    fn look_at_euler_ignores_roll() {
        let pos = Vec3::new(0.0, 1.0, 0.0);
        let a = look_at_euler(pos, Vec3::new(20.0, 40.0, 0.0)).unwrap();
        let b = look_at_euler(pos, Vec3::new(20.0, 40.0, 75.0)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn look_at_euler_yaw_90_looks_down_x() {
        let view = look_at_euler(Vec3::ZERO, Vec3::new(0.0, 90.0, 0.0)).unwrap();
        assert_abs_diff_eq!((-view.row(2)).truncate(), Vec3::X, epsilon = 1e-6);
    }

    #[test]
    fn perspective_closed_form() {
        let (near, far) = (0.1, 100.0);
        let p = perspective(near, far, 90.0, 1.0);
        // tan(45°) = 1, so range = near and Px = Py = 1.
        assert_abs_diff_eq!(p[(1, 1)], 1.0, epsilon = 1e-5);
        assert_eq!(p[(0, 0)], p[(1, 1)]);
        let wide = perspective(near, far, 90.0, 2.0);
        assert_abs_diff_eq!(wide[(0, 0)], 0.5, epsilon = 1e-5);
        assert_abs_diff_eq!(p[(2, 2)], -(far + near) / (far - near), epsilon = 1e-6);
        assert_abs_diff_eq!(p[(2, 3)], -2.0 * far * near / (far - near), epsilon = 1e-6);
        assert_eq!(p[(3, 2)], -1.0);
        assert_eq!(p[(3, 3)], 0.0);
    }

    #[test]
    fn perspective_maps_near_plane_to_minus_one() {
        let p = perspective(0.1, 100.0, 60.0, 16.0 / 9.0);
        let clip = p * Vec4::new(0.0, 0.0, -0.1, 1.0);
        assert_abs_diff_eq!(clip.z / clip.w, -1.0, epsilon = 1e-4);
        let clip = p * Vec4::new(0.0, 0.0, -100.0, 1.0);
        assert_abs_diff_eq!(clip.z / clip.w, 1.0, epsilon = 1e-4);
    }
}
