//! Vector and matrix helpers for the rasterization pipeline.
//!
//! Matrices follow the row-vector convention: a point is transformed as
//! `v * M`, translations live in the last row, and `mat4_mul(a, b)` applies
//! `a` first and `b` second. The storage is plain `nalgebra` so the usual
//! vector methods (`dot`, `cross`, `norm`, ...) remain available.
use nalgebra::{Matrix4, Vector2, Vector3, Vector4};

pub type Vec2 = Vector2<f32>;
pub type Vec3 = Vector3<f32>;
pub type Vec4 = Vector4<f32>;
pub type Mat4 = Matrix4<f32>;

/// Scale applied to NDC depth by [`viewport`]; NDC `[0, 1]` lands in `[0, DEPTH_SCALE]`.
pub const DEPTH_SCALE: f32 = 255.0 / 2.0;

pub fn dot(a: &Vec3, b: &Vec3) -> f32 {
    a.dot(b)
}

pub fn length(v: &Vec3) -> f32 {
    v.norm()
}

/// Unit vector in the direction of `v`.
///
/// A zero-length input yields NaN components; callers must not pass one.
pub fn normalize(v: &Vec3) -> Vec3 {
    v.normalize()
}

pub fn cross(a: &Vec3, b: &Vec3) -> Vec3 {
    a.cross(b)
}

/// Component-wise product.
pub fn mul(a: &Vec3, b: &Vec3) -> Vec3 {
    a.component_mul(b)
}

pub fn scale(v: &Vec3, s: f32) -> Vec3 {
    v * s
}

pub fn vec4_add_scalar(v: &Vec4, s: f32) -> Vec4 {
    v.add_scalar(s)
}

pub fn vec4_scale(v: &Vec4, s: f32) -> Vec4 {
    v * s
}

/// Transform a row vector: `v * m`.
pub fn transform(v: &Vec4, m: &Mat4) -> Vec4 {
    m.tr_mul(v)
}

/// Compose two transforms so that `a` is applied before `b`.
pub fn mat4_mul(a: &Mat4, b: &Mat4) -> Mat4 {
    a * b
}

pub fn identity() -> Mat4 {
    Mat4::identity()
}

/// Right-handed perspective projection.
///
/// View-space points in front of the camera (`z` in `[-near, -far]`) map to
/// NDC depth `[0, 1]` after the divide by `w = -z`.
pub fn perspective_rh(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
    let (sin_fov, cos_fov) = (fov_y * 0.5).sin_cos();
    let height = cos_fov / sin_fov;
    let width = height / aspect;
    let range = far / (near - far);
    let offset = -(far * near) / (far - near);

    #[rustfmt::skip]
    let m = Mat4::new(
        width, 0.0,    0.0,    0.0,
        0.0,   height, 0.0,    0.0,
        0.0,   0.0,    range,  -1.0,
        0.0,   0.0,    offset, 0.0,
    );
    m
}

/// Right-handed view matrix looking from `pos` towards `target`.
///
/// Degenerate when `up` is parallel to the viewing direction or when `pos`
/// and `target` coincide.
pub fn look_at_rh(pos: &Vec3, target: &Vec3, up: &Vec3) -> Mat4 {
    let z = normalize(&(target - pos));
    let x = normalize(&cross(&z, up));
    let y = cross(&x, &z);

    #[rustfmt::skip]
    let m = Mat4::new(
        x.x,            y.x,            -z.x,         0.0,
        x.y,            y.y,            -z.y,         0.0,
        x.z,            y.z,            -z.z,         0.0,
        -dot(&x, pos),  -dot(&y, pos),  dot(&z, pos), 1.0,
    );
    m
}

/// Map NDC x/y in `[-1, 1]` to pixels `[x, x + w] x [y, y + h]` and scale
/// depth by [`DEPTH_SCALE`].
pub fn viewport(x: f32, y: f32, w: f32, h: f32) -> Mat4 {
    #[rustfmt::skip]
    let m = Mat4::new(
        w / 2.0,     0.0,         0.0,         0.0,
        0.0,         h / 2.0,     0.0,         0.0,
        0.0,         0.0,         DEPTH_SCALE, 0.0,
        x + w / 2.0, y + h / 2.0, 0.0,         1.0,
    );
    m
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use nalgebra::Point3;

    #[test]
    fn test_vec3_dot_and_length() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(4.0, 5.0, 6.0);
        assert_relative_eq!(dot(&a, &b), 32.0);
        assert_relative_eq!(length(&Vec3::new(3.0, 4.0, 0.0)), 5.0);
    }

    #[test]
    fn test_vec3_cross() {
        let c = cross(&Vec3::x(), &Vec3::y());
        assert_abs_diff_eq!(c, Vec3::z(), epsilon = 1e-6);
    }

    #[test]
    fn test_normalize_zero_is_nan() {
        let n = normalize(&Vec3::zeros());
        assert!(n.x.is_nan());
    }

    #[test]
    fn test_component_ops() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(mul(&a, &Vec3::new(2.0, 3.0, 4.0)), Vec3::new(2.0, 6.0, 12.0));
        assert_eq!(scale(&a, 2.0), Vec3::new(2.0, 4.0, 6.0));
        let v = Vec4::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(vec4_add_scalar(&v, 1.0), Vec4::new(2.0, 3.0, 4.0, 5.0));
        assert_eq!(vec4_scale(&v, 0.5), Vec4::new(0.5, 1.0, 1.5, 2.0));
    }

    #[test]
    fn test_transform_uses_translation_row() {
        let mut m = identity();
        m[(3, 0)] = 5.0;
        let v = transform(&Vec4::new(1.0, 0.0, 0.0, 1.0), &m);
        assert_relative_eq!(v, Vec4::new(6.0, 0.0, 0.0, 1.0));
    }

    #[test]
    fn test_mat4_mul_applies_left_first() {
        let mut translate = identity();
        translate[(3, 0)] = 1.0;
        let mut double = identity();
        double[(0, 0)] = 2.0;

        let p = Vec4::new(1.0, 0.0, 0.0, 1.0);
        // (1 + 1) * 2
        let v = transform(&p, &mat4_mul(&translate, &double));
        assert_relative_eq!(v.x, 4.0);
        // 1 * 2 + 1
        let v = transform(&p, &mat4_mul(&double, &translate));
        assert_relative_eq!(v.x, 3.0);
    }

    #[test]
    fn test_look_at_matches_nalgebra() {
        let eye = Vec3::new(100.0, 100.0, 100.0);
        let target = Vec3::zeros();
        let up = Vec3::y();
        let view = look_at_rh(&eye, &target, &up);
        let expected =
            Mat4::look_at_rh(&Point3::from(eye), &Point3::from(target), &up).transpose();
        assert_relative_eq!(view, expected, epsilon = 1e-4);
    }

    #[test]
    fn test_look_at_moves_eye_to_origin() {
        let eye = Vec3::new(3.0, 4.0, 5.0);
        let view = look_at_rh(&eye, &Vec3::zeros(), &Vec3::y());
        let v = transform(&eye.push(1.0), &view);
        assert_abs_diff_eq!(v, Vec4::new(0.0, 0.0, 0.0, 1.0), epsilon = 1e-5);
    }

    #[test]
    fn test_perspective_depth_range() {
        let (near, far) = (0.5, 50.0);
        let proj = perspective_rh(std::f32::consts::FRAC_PI_2, 1.0, near, far);

        let clip = transform(&Vec4::new(0.0, 0.0, -near, 1.0), &proj);
        assert_abs_diff_eq!(clip.z / clip.w, 0.0, epsilon = 1e-5);

        let clip = transform(&Vec4::new(0.0, 0.0, -far, 1.0), &proj);
        assert_abs_diff_eq!(clip.z / clip.w, 1.0, epsilon = 1e-5);
        assert_relative_eq!(clip.w, far);
    }

    #[test]
    fn test_perspective_fov_edge_maps_to_unit() {
        let proj = perspective_rh(std::f32::consts::FRAC_PI_2, 2.0, 0.1, 10.0);
        // 45 degrees up at distance 1 sits on the top edge of the frustum.
        let clip = transform(&Vec4::new(0.0, 1.0, -1.0, 1.0), &proj);
        assert_abs_diff_eq!(clip.y / clip.w, 1.0, epsilon = 1e-5);
        // Twice as wide as tall, so the horizontal edge sits at x = 2.
        let clip = transform(&Vec4::new(2.0, 0.0, -1.0, 1.0), &proj);
        assert_abs_diff_eq!(clip.x / clip.w, 1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_viewport_corners() {
        let vp = viewport(0.0, 0.0, 512.0, 256.0);
        let lo = transform(&Vec4::new(-1.0, -1.0, 0.0, 1.0), &vp);
        let hi = transform(&Vec4::new(1.0, 1.0, 1.0, 1.0), &vp);
        assert_relative_eq!(lo, Vec4::new(0.0, 0.0, 0.0, 1.0));
        assert_relative_eq!(hi, Vec4::new(512.0, 256.0, DEPTH_SCALE, 1.0));
    }
}
