//! `flycam_shared`
//!
//! Math and platform-neutral pieces used by the viewer:
//! - Vectors, row-major matrices and quaternions (`math`).
//! - View/projection transforms for a column-vector pipeline.
//! - Viewer configuration loaded from JSON.
//! - A backend-agnostic render trait.
//!
//! No `unsafe`, no global state. Math types are `Copy` and thread-safe.

pub mod config;
pub mod math;
pub mod render;

pub mod prelude {
    //! Commonly used exports.

    pub use crate::config::*;
    pub use crate::math::*;
    pub use crate::render::*;
}
