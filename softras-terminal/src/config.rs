//! Viewer configuration loaded from TOML.
use serde::{Deserialize, Serialize};
use softras_core::math::Vec3;
use softras_core::framebuffer::MAX_PIXELS;
use softras_core::Camera;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Invalid value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Everything the viewer needs to set up a frame. Missing keys take the
/// defaults below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Framebuffer size for snapshots; the interactive view follows the terminal.
    pub width: usize,
    pub height: usize,
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub eye: [f32; 3],
    pub target: [f32; 3],
    pub up: [f32; 3],
    pub clear_color: u32,
    pub target_fps: u32,
    /// Draw the corner-to-corner debug line under the mesh.
    pub debug_line: bool,
    /// Per-frame rotation increments in radians.
    pub spin: [f32; 3],
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            width: 512,
            height: 512,
            fov_degrees: 60.0,
            near: 0.1,
            far: 100.0,
            eye: [0.0, 0.0, 5.0],
            target: [0.0, 0.0, 0.0],
            up: [0.0, 1.0, 0.0],
            clear_color: 0x0000_0000,
            target_fps: 30,
            debug_line: true,
            spin: [0.01, 0.015, 0.0],
        }
    }
}

impl ViewerConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// The effective configuration as a TOML document `from_toml` accepts.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::Invalid {
                field: "width/height",
                reason: format!("{}x{} has no pixels", self.width, self.height),
            });
        }
        match self.width.checked_mul(self.height) {
            Some(pixels) if pixels <= MAX_PIXELS => {}
            _ => {
                return Err(ConfigError::Invalid {
                    field: "width/height",
                    reason: format!(
                        "{}x{} exceeds {} pixels",
                        self.width, self.height, MAX_PIXELS
                    ),
                })
            }
        }
        if !(self.near > 0.0 && self.far > self.near) {
            return Err(ConfigError::Invalid {
                field: "near/far",
                reason: format!("need 0 < near < far, got {} and {}", self.near, self.far),
            });
        }
        if !(self.fov_degrees > 0.0 && self.fov_degrees < 180.0) {
            return Err(ConfigError::Invalid {
                field: "fov_degrees",
                reason: format!("{} is outside (0, 180)", self.fov_degrees),
            });
        }
        if self.eye == self.target {
            return Err(ConfigError::Invalid {
                field: "eye",
                reason: "eye and target coincide".to_string(),
            });
        }
        let forward = Vec3::from(self.target) - Vec3::from(self.eye);
        if forward.cross(&Vec3::from(self.up)).norm() == 0.0 {
            return Err(ConfigError::Invalid {
                field: "up",
                reason: "up is parallel to the view direction".to_string(),
            });
        }
        if self.target_fps == 0 {
            return Err(ConfigError::Invalid {
                field: "target_fps",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// Camera for a framebuffer of the given size.
    pub fn camera(&self, width: usize, height: usize) -> Camera {
        let mut camera = Camera::new(width as u32, height as u32);
        camera.position = Vec3::from(self.eye);
        camera.target = Vec3::from(self.target);
        camera.up = Vec3::from(self.up);
        camera.fov = self.fov_degrees.to_radians();
        camera.near = self.near;
        camera.far = self.far;
        camera
    }
}
