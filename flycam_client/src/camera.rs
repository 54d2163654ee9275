//! Fly camera.
//!
//! Orientation is a quaternion; each frame's yaw/pitch/roll is applied as a
//! rotation around the camera's current up/right/forward axis, so the camera
//! has no fixed "world up". The view matrix is only rebuilt when the camera
//! moved, and `take_dirty` tells the renderer when to re-upload it.

use flycam_shared::{
    config::CameraConfig,
    math::{translation_matrix, view_matrix, Mat4, MathError, Quat, Vec3},
};
use tracing::trace;

use crate::input::CameraActions;

#[derive(Debug, Clone)]
pub struct CameraState {
    position: Vec3,
    orientation: Quat,
    rotation: Mat4,
    right: Vec3,
    up: Vec3,
    forward: Vec3,
    view: Mat4,
    dirty: bool,
}

impl CameraState {
    pub fn new(cfg: &CameraConfig) -> Self {
        let orientation = Quat::from_angle_axis(cfg.start_yaw, Vec3::Y);
        let mut cam = Self {
            position: cfg.position,
            orientation,
            rotation: Mat4::IDENTITY,
            right: Vec3::X,
            up: Vec3::Y,
            forward: -Vec3::Z,
            view: Mat4::IDENTITY,
            dirty: true,
        };
        cam.rebuild_basis();
        cam.rebuild_view();
        cam
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn orientation(&self) -> Quat {
        self.orientation
    }

    pub fn rotation(&self) -> Mat4 {
        self.rotation
    }

    pub fn right(&self) -> Vec3 {
        self.right
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    /// World-space view direction.
    pub fn forward(&self) -> Vec3 {
        self.forward
    }

    pub fn view(&self) -> Mat4 {
        self.view
    }

    /// Returns whether the view changed since the last call and clears the
    /// flag.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Applies one frame of held actions. Returns whether the camera moved.
    pub fn update(
        &mut self,
        actions: CameraActions,
        dt_secs: f32,
        cfg: &CameraConfig,
    ) -> Result<bool, MathError> {
        let mut changed = false;

        if actions.intersects(CameraActions::ROTATION) {
            let (mut yaw, mut pitch, mut roll) = (0.0, 0.0, 0.0);
            let yaw_step = cfg.yaw_speed * dt_secs;
            let pitch_step = cfg.pitch_speed * dt_secs;
            let roll_step = cfg.roll_speed * dt_secs;

            if actions.contains(CameraActions::YAW_LEFT) {
                yaw -= yaw_step;
                self.turn(yaw, self.up)?;
            }
            if actions.contains(CameraActions::YAW_RIGHT) {
                yaw += yaw_step;
                self.turn(yaw, self.up)?;
            }
            if actions.contains(CameraActions::PITCH_DOWN) {
                pitch -= pitch_step;
                self.turn(pitch, self.right)?;
            }
            if actions.contains(CameraActions::PITCH_UP) {
                pitch += pitch_step;
                self.turn(pitch, self.right)?;
            }
            if actions.contains(CameraActions::ROLL_LEFT) {
                roll += roll_step;
                self.turn(roll, self.forward)?;
            }
            if actions.contains(CameraActions::ROLL_RIGHT) {
                roll -= roll_step;
                self.turn(roll, self.forward)?;
            }
            changed = true;
        }

        if actions.intersects(CameraActions::MOVEMENT) {
            let step = cfg.linear_speed * dt_secs;
            let mut delta = Vec3::ZERO;
            if actions.contains(CameraActions::MOVE_LEFT) {
                delta -= self.right * step;
            }
            if actions.contains(CameraActions::MOVE_RIGHT) {
                delta += self.right * step;
            }
            if actions.contains(CameraActions::MOVE_FORWARD) {
                delta += self.forward * step;
            }
            if actions.contains(CameraActions::MOVE_BACK) {
                delta -= self.forward * step;
            }
            if actions.contains(CameraActions::MOVE_UP) {
                delta += self.up * step;
            }
            if actions.contains(CameraActions::MOVE_DOWN) {
                delta -= self.up * step;
            }
            self.position += delta;
            changed = true;
        }

        if changed {
            self.rebuild_view();
            self.dirty = true;
            trace!(
                position = %self.position,
                orientation = %self.orientation,
                "Camera updated"
            );
        }
        Ok(changed)
    }

    fn turn(&mut self, degrees: f32, axis: Vec3) -> Result<(), MathError> {
        let delta = Quat::from_angle_axis(degrees, axis).normalize()?;
        self.orientation = self.orientation * delta;
        self.rebuild_basis();
        Ok(())
    }

    fn rebuild_basis(&mut self) {
        self.rotation = self.orientation.to_rotation_matrix();
        self.right = self.rotation.row(0).truncate();
        self.up = self.rotation.row(1).truncate();
        self.forward = -self.rotation.row(2).truncate();
    }

    fn rebuild_view(&mut self) {
        let p = self.position;
        self.view = view_matrix(translation_matrix(-p.x, -p.y, -p.z), self.rotation);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use flycam_shared::math::look_at;

    fn assert_orthonormal(cam: &CameraState) {
        assert_abs_diff_eq!(cam.right().magnitude(), 1.0, epsilon = 1e-4);
        assert_abs_diff_eq!(cam.up().magnitude(), 1.0, epsilon = 1e-4);
        assert_abs_diff_eq!(cam.forward().magnitude(), 1.0, epsilon = 1e-4);
        assert_abs_diff_eq!(cam.right().dot(cam.up()), 0.0, epsilon = 1e-4);
        assert_abs_diff_eq!(cam.right().dot(cam.forward()), 0.0, epsilon = 1e-4);
        assert_abs_diff_eq!(cam.up().dot(cam.forward()), 0.0, epsilon = 1e-4);
    }

    #[test]
    fn initial_view_matches_look_at() {
        let cfg = CameraConfig::default();
        let cam = CameraState::new(&cfg);
        let expected = look_at(cfg.position, Vec3::ZERO, Vec3::Y).unwrap();
        assert_abs_diff_eq!(cam.view(), expected, epsilon = 1e-6);
        assert_abs_diff_eq!(cam.forward(), Vec3::Z, epsilon = 1e-6);
        assert_abs_diff_eq!(cam.right(), -Vec3::X, epsilon = 1e-6);
    }

    #[test]
    fn idle_frame_changes_nothing() {
        let cfg = CameraConfig::default();
        let mut cam = CameraState::new(&cfg);
        assert!(cam.take_dirty());
        assert!(!cam.take_dirty());
        let view = cam.view();
        assert!(!cam.update(CameraActions::NONE, 0.016, &cfg).unwrap());
        assert!(!cam.take_dirty());
        assert_eq!(cam.view(), view);
    }

    #[test]
    fn forward_moves_along_view_direction() {
        let cfg = CameraConfig::default();
        let mut cam = CameraState::new(&cfg);
        assert!(cam.update(CameraActions::MOVE_FORWARD, 0.5, &cfg).unwrap());
        assert!(cam.take_dirty());
        // 2 units/s for half a second toward the origin.
        assert_abs_diff_eq!(cam.position(), Vec3::new(0.0, 0.0, -1.0), epsilon = 1e-5);
        assert_abs_diff_eq!(
            cam.view().transform_point(Vec3::ZERO),
            Vec3::new(0.0, 0.0, -1.0),
            epsilon = 1e-5
        );
    }

    #[test]
    fn strafe_and_climb_follow_basis() {
        let cfg = CameraConfig::default();
        let mut cam = CameraState::new(&cfg);
        cam.update(CameraActions::MOVE_RIGHT | CameraActions::MOVE_UP, 1.0, &cfg)
            .unwrap();
        // Right is world -X at the start yaw.
        assert_abs_diff_eq!(cam.position(), Vec3::new(-2.0, 2.0, -2.0), epsilon = 1e-5);
        cam.update(CameraActions::MOVE_LEFT | CameraActions::MOVE_DOWN, 1.0, &cfg)
            .unwrap();
        assert_abs_diff_eq!(cam.position(), cfg.position, epsilon = 1e-5);
    }

    #[test]
    fn yaw_keeps_up_and_orthonormal_basis() {
        let cfg = CameraConfig::default();
        let mut cam = CameraState::new(&cfg);
        for _ in 0..45 {
            cam.update(CameraActions::YAW_RIGHT, 0.01, &cfg).unwrap();
        }
        assert_orthonormal(&cam);
        assert_abs_diff_eq!(cam.up(), Vec3::Y, epsilon = 1e-4);
        // 45 degrees of yaw away from +Z.
        assert_abs_diff_eq!(cam.forward().dot(Vec3::Z), 45f32.to_radians().cos(), epsilon = 1e-3);
    }

    #[test]
    fn opposite_yaw_keys_cancel_over_two_frames() {
        let cfg = CameraConfig::default();
        let mut cam = CameraState::new(&cfg);
        let start = cam.forward();
        cam.update(CameraActions::YAW_LEFT, 0.1, &cfg).unwrap();
        assert!((cam.forward() - start).magnitude() > 0.1);
        cam.update(CameraActions::YAW_RIGHT, 0.1, &cfg).unwrap();
        assert_abs_diff_eq!(cam.forward(), start, epsilon = 1e-4);
    }

    #[test]
    fn pitch_and_roll_stay_orthonormal() {
        let cfg = CameraConfig::default();
        let mut cam = CameraState::new(&cfg);
        let actions = CameraActions::PITCH_UP | CameraActions::ROLL_LEFT | CameraActions::YAW_LEFT;
        for _ in 0..200 {
            cam.update(actions, 0.016, &cfg).unwrap();
        }
        assert_orthonormal(&cam);
        assert_abs_diff_eq!(cam.orientation().norm(), 1.0, epsilon = 1e-3);
    }

    #[test]
    fn roll_keeps_forward() {
        let cfg = CameraConfig::default();
        let mut cam = CameraState::new(&cfg);
        let forward = cam.forward();
        cam.update(CameraActions::ROLL_RIGHT, 0.3, &cfg).unwrap();
        assert_abs_diff_eq!(cam.forward(), forward, epsilon = 1e-4);
        assert!((cam.up() - Vec3::Y).magnitude() > 0.1);
    }
}
