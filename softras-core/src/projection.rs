//! Camera and projection utilities.
use crate::math::{look_at_rh, mat4_mul, perspective_rh, Mat4, Vec3};

/// Perspective camera producing matrices in the row-vector convention.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    /// Vertical field of view in radians.
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 5.0),
            target: Vec3::zeros(),
            up: Vec3::y(),
            fov: 60f32.to_radians(),
            aspect: width as f32 / height.max(1) as f32,
            near: 0.1,
            far: 100.0,
        }
    }

    pub fn set_aspect(&mut self, width: usize, height: usize) {
        self.aspect = width as f32 / height.max(1) as f32;
    }

    /// Create the view matrix (camera transformation)
    pub fn view_matrix(&self) -> Mat4 {
        look_at_rh(&self.position, &self.target, &self.up)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        perspective_rh(self.fov, self.aspect, self.near, self.far)
    }

    /// View followed by projection.
    pub fn view_projection(&self) -> Mat4 {
        mat4_mul(&self.view_matrix(), &self.projection_matrix())
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(512, 512)
    }
}
