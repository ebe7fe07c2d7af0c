//! Model transforms and the per-vertex clip -> NDC -> screen mapping.
use nalgebra::Vector3;

use crate::math::{mat4_mul, transform, vec4_scale, Mat4, Vec3, Vec4};

/// Rotation state around three axes (in radians)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationState {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl RotationState {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    /// Rotate by delta amounts (in radians)
    pub fn rotate(&mut self, dx: f32, dy: f32, dz: f32) {
        self.x += dx;
        self.y += dy;
        self.z += dz;
    }
}

impl Default for RotationState {
    fn default() -> Self {
        Self::zero()
    }
}

/// Builders for model matrices in the row-vector convention of [`crate::math`].
pub struct Transform;

impl Transform {
    /// Rotation applying X, then Y, then Z.
    pub fn rotation_matrix(rotation: &RotationState) -> Mat4 {
        let rx = Mat4::new_rotation(Vector3::new(rotation.x, 0.0, 0.0)).transpose();
        let ry = Mat4::new_rotation(Vector3::new(0.0, rotation.y, 0.0)).transpose();
        let rz = Mat4::new_rotation(Vector3::new(0.0, 0.0, rotation.z)).transpose();

        mat4_mul(&mat4_mul(&rx, &ry), &rz)
    }

    pub fn translation_matrix(x: f32, y: f32, z: f32) -> Mat4 {
        Mat4::new_translation(&Vector3::new(x, y, z)).transpose()
    }

    pub fn scale_matrix(sx: f32, sy: f32, sz: f32) -> Mat4 {
        Mat4::new_nonuniform_scaling(&Vector3::new(sx, sy, sz))
    }

    /// Model, then view, then projection.
    pub fn mvp_matrix(model: &Mat4, view: &Mat4, projection: &Mat4) -> Mat4 {
        mat4_mul(&mat4_mul(model, view), projection)
    }
}

/// Map a model-space position to screen space.
///
/// The clip-space result is divided by `w` before `viewport` is applied, so
/// `viewport` maps NDC to pixels. Returns `None` when `w` is zero or the
/// result is not finite; nothing is clipped against the near plane.
pub fn project_vertex(position: &Vec3, view_projection: &Mat4, viewport: &Mat4) -> Option<Vec4> {
    let clip = transform(&position.push(1.0), view_projection);
    if clip.w == 0.0 {
        return None;
    }
    let ndc = vec4_scale(&clip, 1.0 / clip.w);
    let screen = transform(&ndc, viewport);
    if screen.iter().all(|c| c.is_finite()) {
        Some(screen)
    } else {
        None
    }
}
