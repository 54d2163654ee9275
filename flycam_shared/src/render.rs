//! Rendering abstraction.
//!
//! This crate does not depend on a graphics backend. The viewer talks to a
//! [`RenderBackend`]; a GL/wgpu implementation lives with the windowing
//! code. Matrices arrive column-major, ready for upload.

/// Static scene geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mesh {
    Triangle,
    CubeFace,
}

/// A minimal rendering API.
pub trait RenderBackend: Send + Sync {
    fn begin_frame(&mut self);
    fn upload_view(&mut self, view: &[f32; 16]);
    fn upload_projection(&mut self, projection: &[f32; 16]);
    /// Two-light uniform block, eight vec4s.
    fn upload_lights(&mut self, block: &[f32; 32]);
    fn draw(&mut self, mesh: Mesh, vertices: u32);
    fn end_frame(&mut self);
}

/// A no-op renderer useful for headless runs.
#[derive(Default)]
pub struct NullRenderer;

impl RenderBackend for NullRenderer {
    fn begin_frame(&mut self) {}
    fn upload_view(&mut self, _view: &[f32; 16]) {}
    fn upload_projection(&mut self, _projection: &[f32; 16]) {}
    fn upload_lights(&mut self, _block: &[f32; 32]) {}
    fn draw(&mut self, _mesh: Mesh, _vertices: u32) {}
    fn end_frame(&mut self) {}
}

/// Keeps every upload and draw call. Used by tests.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pub frames: u32,
    pub views: Vec<[f32; 16]>,
    pub projections: Vec<[f32; 16]>,
    pub lights: Vec<[f32; 32]>,
    pub draws: Vec<(Mesh, u32)>,
    in_frame: bool,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn in_frame(&self) -> bool {
        self.in_frame
    }

    /// Total vertices drawn for `mesh` across all recorded frames.
    pub fn vertices_drawn(&self, mesh: Mesh) -> u32 {
        self.draws
            .iter()
            .filter(|(m, _)| *m == mesh)
            .map(|(_, n)| n)
            .sum()
    }
}

impl RenderBackend for RecordingRenderer {
    fn begin_frame(&mut self) {
        self.in_frame = true;
    }

    fn upload_view(&mut self, view: &[f32; 16]) {
        self.views.push(*view);
    }

    fn upload_projection(&mut self, projection: &[f32; 16]) {
        self.projections.push(*projection);
    }

    fn upload_lights(&mut self, block: &[f32; 32]) {
        self.lights.push(*block);
    }

    fn draw(&mut self, mesh: Mesh, vertices: u32) {
        self.draws.push((mesh, vertices));
    }

    fn end_frame(&mut self) {
        self.in_frame = false;
        self.frames += 1;
    }
}
