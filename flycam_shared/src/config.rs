//! Configuration system.
//!
//! Loads viewer configuration from JSON strings or files. Every field has a
//! default, so a partial document (or `{}`) is valid.

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::math::Vec3;

/// Root configuration for the viewer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub window: WindowConfig,
    pub projection: ProjectionConfig,
    pub camera: CameraConfig,
    pub lights: LightConfig,
    /// Session log, appended to on every run.
    pub log_file: PathBuf,
}

/// Initial framebuffer size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
        }
    }
}

impl WindowConfig {
    /// Width over height. A zero height (minimized window) is treated as 1.
    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionConfig {
    pub near: f32,
    pub far: f32,
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            near: 0.1,
            far: 99.9,
            fov_degrees: 50.625,
        }
    }
}

/// Camera start pose and speeds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// World-space start position.
    pub position: Vec3,
    /// Initial rotation around +Y, in degrees.
    pub start_yaw: f32,
    /// Units per second.
    pub linear_speed: f32,
    /// Degrees per second.
    pub yaw_speed: f32,
    pub pitch_speed: f32,
    pub roll_speed: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, -2.0),
            start_yaw: 180.0,
            linear_speed: 2.0,
            yaw_speed: 100.0,
            pitch_speed: 100.0,
            roll_speed: 100.0,
        }
    }
}

/// Animated point lights.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightConfig {
    /// Units per second.
    pub speed: f32,
    /// Lights reverse direction when they pass `±bound`.
    pub bound: f32,
    pub light1_start_z: f32,
    pub light2_start_x: f32,
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            speed: 20.0,
            bound: 8.0,
            light1_start_z: 7.5,
            light2_start_x: 4.5,
        }
    }
}

fn default_log_file() -> PathBuf {
    PathBuf::from("log").join("flycam.log")
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            projection: ProjectionConfig::default(),
            camera: CameraConfig::default(),
            lights: LightConfig::default(),
            log_file: default_log_file(),
        }
    }
}

impl ViewerConfig {
    /// Parses config from JSON.
    pub fn from_json_str(s: &str) -> serde_json::Result<Self> {
        serde_json::from_str(s)
    }

    /// Reads and parses a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        let cfg = Self::from_json_str(&text)
            .with_context(|| format!("parse config {}", path.display()))?;
        tracing::debug!(path = %path.display(), "Loaded viewer config");
        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let cfg = ViewerConfig::from_json_str("{}").unwrap();
        assert_eq!(cfg, ViewerConfig::default());
        assert_eq!(cfg.window.width, 1280);
        assert_eq!(cfg.projection.fov_degrees, 50.625);
        assert_eq!(cfg.camera.position, Vec3::new(0.0, 0.0, -2.0));
        assert_eq!(cfg.log_file, PathBuf::from("log/flycam.log"));
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let cfg = ViewerConfig::from_json_str(
            r#"{ "camera": { "linear_speed": 5.0 }, "window": { "height": 600 } }"#,
        )
        .unwrap();
        assert_eq!(cfg.camera.linear_speed, 5.0);
        assert_eq!(cfg.camera.yaw_speed, 100.0);
        assert_eq!(cfg.window.width, 1280);
        assert_eq!(cfg.window.height, 600);
    }

    #[test]
    fn bad_json_is_rejected() {
        assert!(ViewerConfig::from_json_str("{ \"window\": 3 }").is_err());
    }

    #[test]
    fn aspect_handles_zero_height() {
        let w = WindowConfig {
            width: 800,
            height: 0,
        };
        assert_eq!(w.aspect(), 800.0);
        assert_eq!(WindowConfig::default().aspect(), 1280.0 / 720.0);
    }

    #[test]
    fn load_reports_missing_file() {
        let err = ViewerConfig::load("does/not/exist.json").unwrap_err();
        assert!(format!("{err:#}").contains("read config"));
    }
}
