//! Frame loop.
//!
//! Owns the camera, lights and projection and pushes whatever changed to the
//! render backend once per frame.

use anyhow::Context;
use flycam_shared::{
    config::ViewerConfig,
    math::{perspective, Mat4},
    render::{Mesh, RenderBackend},
};
use tracing::{debug, info};

use crate::{camera::CameraState, input::CameraActions, lights::LightState};

/// Static scene: two triangles and six cube faces.
const SCENE: [(Mesh, u32); 8] = [
    (Mesh::Triangle, 3),
    (Mesh::Triangle, 3),
    (Mesh::CubeFace, 6),
    (Mesh::CubeFace, 6),
    (Mesh::CubeFace, 6),
    (Mesh::CubeFace, 6),
    (Mesh::CubeFace, 6),
    (Mesh::CubeFace, 6),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    Continue,
    Quit,
}

pub struct Viewer<R: RenderBackend> {
    cfg: ViewerConfig,
    camera: CameraState,
    lights: LightState,
    projection: Mat4,
    projection_dirty: bool,
    backend: R,
    frames: u64,
}

impl<R: RenderBackend> Viewer<R> {
    /// Builds the initial camera and projection and uploads them along with
    /// the light block.
    pub fn new(cfg: ViewerConfig, mut backend: R) -> Self {
        let mut camera = CameraState::new(&cfg.camera);
        let lights = LightState::new(&cfg.lights);
        let projection = projection_for(&cfg);

        backend.upload_view(&camera.view().to_cols_array());
        camera.take_dirty();
        backend.upload_projection(&projection.to_cols_array());
        backend.upload_lights(&lights.uniform_block());

        info!(
            width = cfg.window.width,
            height = cfg.window.height,
            position = %camera.position(),
            "Viewer ready"
        );
        debug!("Projection:\n{projection}");

        Self {
            cfg,
            camera,
            lights,
            projection,
            projection_dirty: false,
            backend,
            frames: 0,
        }
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.cfg
    }

    pub fn camera(&self) -> &CameraState {
        &self.camera
    }

    pub fn lights(&self) -> &LightState {
        &self.lights
    }

    pub fn projection(&self) -> Mat4 {
        self.projection
    }

    pub fn backend(&self) -> &R {
        &self.backend
    }

    pub fn into_backend(self) -> R {
        self.backend
    }

    /// Frames rendered so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Records a framebuffer resize. The projection is rebuilt on the next
    /// frame.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.cfg.window.width = width;
        self.cfg.window.height = height;
        self.projection_dirty = true;
        debug!(width, height, "Resized");
    }

    /// Runs one frame of `dt_secs` with the given held actions.
    pub fn frame(&mut self, dt_secs: f32, actions: CameraActions) -> anyhow::Result<FrameOutcome> {
        if actions.contains(CameraActions::QUIT) {
            info!(frames = self.frames, "Quit requested");
            return Ok(FrameOutcome::Quit);
        }

        self.backend.begin_frame();

        self.lights.advance(dt_secs, &self.cfg.lights);
        self.backend.upload_lights(&self.lights.uniform_block());

        if std::mem::take(&mut self.projection_dirty) {
            self.projection = projection_for(&self.cfg);
            self.backend.upload_projection(&self.projection.to_cols_array());
        }

        self.camera
            .update(actions, dt_secs, &self.cfg.camera)
            .with_context(|| format!("camera update on frame {}", self.frames))?;
        if self.camera.take_dirty() {
            self.backend.upload_view(&self.camera.view().to_cols_array());
        }

        for (mesh, vertices) in SCENE {
            self.backend.draw(mesh, vertices);
        }
        self.backend.end_frame();
        self.frames += 1;

        Ok(FrameOutcome::Continue)
    }
}

fn projection_for(cfg: &ViewerConfig) -> Mat4 {
    let p = &cfg.projection;
    perspective(p.near, p.far, p.fov_degrees, cfg.window.aspect())
}
