//! `flycam_client`
//!
//! Viewer-side systems:
//! - Key bindings and per-frame camera actions
//! - Quaternion fly camera with a dirty-flagged view matrix
//! - Animated lights packed into a uniform block
//! - The frame loop driving a `RenderBackend`
//! - Stderr + session-file logging

pub mod camera;
pub mod input;
pub mod lights;
pub mod log;
pub mod viewer;

pub use viewer::{FrameOutcome, Viewer};
