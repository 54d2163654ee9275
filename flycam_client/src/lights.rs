//! Animated point lights.
//!
//! Two lights slide back and forth along one axis each and are uploaded as a
//! single uniform block.

use flycam_shared::{
    config::LightConfig,
    math::{Vec3, Vec4},
};

const LIGHT1_SPECULAR: Vec4 = Vec4::new(1.0, 1.0, 1.0, 0.0);
const LIGHT1_DIFFUSE: Vec4 = Vec4::new(0.5, 0.7, 0.5, 0.0);
const LIGHT1_AMBIENT: Vec4 = Vec4::new(0.2, 0.2, 0.2, 0.0);
const LIGHT2_SPECULAR: Vec4 = Vec4::new(1.0, 1.0, 1.0, 0.0);
const LIGHT2_DIFFUSE: Vec4 = Vec4::new(0.5, 0.5, 0.7, 0.0);
const LIGHT2_AMBIENT: Vec4 = Vec4::new(0.2, 0.2, 0.2, 0.0);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightState {
    /// Light 1 moves along z.
    pub light1_z: f32,
    /// Light 2 moves along x.
    pub light2_x: f32,
    dir1: f32,
    dir2: f32,
}

impl LightState {
    pub fn new(cfg: &LightConfig) -> Self {
        Self {
            light1_z: cfg.light1_start_z,
            light2_x: cfg.light2_start_x,
            dir1: -1.0,
            dir2: -1.0,
        }
    }

    pub fn light1_position(&self) -> Vec3 {
        Vec3::new(7.5, 7.5, self.light1_z)
    }

    pub fn light2_position(&self) -> Vec3 {
        Vec3::new(self.light2_x, 7.5, 6.5)
    }

    /// Moves both lights, reversing a light once it reaches `±bound`. The
    /// step that crosses a bound is kept.
    pub fn advance(&mut self, dt_secs: f32, cfg: &LightConfig) {
        let step = cfg.speed * dt_secs;
        self.light1_z += self.dir1 * step;
        self.light2_x += self.dir2 * step;
        self.dir1 = bounce(self.light1_z, self.dir1, cfg.bound);
        self.dir2 = bounce(self.light2_x, self.dir2, cfg.bound);
    }

    /// Positions followed by specular, diffuse and ambient colours of each
    /// light, eight vec4s in all.
    pub fn uniform_block(&self) -> [f32; 32] {
        let vecs = [
            self.light1_position().extend(1.0),
            self.light2_position().extend(1.0),
            LIGHT1_SPECULAR,
            LIGHT1_DIFFUSE,
            LIGHT1_AMBIENT,
            LIGHT2_SPECULAR,
            LIGHT2_DIFFUSE,
            LIGHT2_AMBIENT,
        ];
        let mut block = [0.0; 32];
        for (chunk, v) in block.chunks_exact_mut(4).zip(vecs) {
            chunk.copy_from_slice(&v.to_array());
        }
        block
    }
}

fn bounce(value: f32, dir: f32, bound: f32) -> f32 {
    if value >= bound {
        -1.0
    } else if value <= -bound {
        1.0
    } else {
        dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_block_layout() {
        let lights = LightState::new(&LightConfig::default());
        let block = lights.uniform_block();
        assert_eq!(&block[0..4], &[7.5, 7.5, 7.5, 1.0]);
        assert_eq!(&block[4..8], &[4.5, 7.5, 6.5, 1.0]);
        assert_eq!(&block[12..16], &[0.5, 0.7, 0.5, 0.0]);
        assert_eq!(&block[24..28], &[0.5, 0.5, 0.7, 0.0]);
        assert_eq!(&block[28..32], &[0.2, 0.2, 0.2, 0.0]);
    }

    #[test]
    fn lights_start_moving_toward_negative() {
        let cfg = LightConfig::default();
        let mut lights = LightState::new(&cfg);
        lights.advance(0.1, &cfg);
        assert!((lights.light1_z - 5.5).abs() < 1e-5);
        assert!((lights.light2_x - 2.5).abs() < 1e-5);
    }

    #[test]
    fn lights_bounce_at_bounds() {
        let cfg = LightConfig::default();
        let mut lights = LightState::new(&cfg);
        // 7.5 - 16 = -8.5: past the lower bound, so the next step heads back.
        lights.advance(0.8, &cfg);
        assert!(lights.light1_z <= -cfg.bound);
        lights.advance(0.1, &cfg);
        assert!((lights.light1_z - -6.5).abs() < 1e-4);
        // Light 2 overshot to -11.5 and needs a few frames to get back.
        let limit = cfg.bound + cfg.speed * 0.016 + 1e-3;
        for i in 0..1000 {
            lights.advance(0.016, &cfg);
            assert!(lights.light1_z.abs() < limit);
            if i > 100 {
                assert!(lights.light2_x.abs() < limit);
            }
        }
    }
}
