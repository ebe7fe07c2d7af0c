//! Triangle and line rasterization into a [`Framebuffer`].
use crate::color::{lerp, saturating_add, scale};
use crate::framebuffer::Framebuffer;
use crate::geometry::Mesh;
use crate::math::{cross, viewport, Mat4, Vec2, Vec3, Vec4};
use crate::transform::project_vertex;

/// Supplies the three corner colors of a triangle, by its ordinal in the
/// index stream.
pub trait ColorSource {
    fn corner_colors(&self, triangle: usize) -> [u32; 3];
}

impl<F> ColorSource for F
where
    F: Fn(usize) -> [u32; 3],
{
    fn corner_colors(&self, triangle: usize) -> [u32; 3] {
        self(triangle)
    }
}

/// Deterministic pseudo-colors hashed from each corner's index-stream position.
#[derive(Debug, Clone, Copy, Default)]
pub struct HashedColors;

impl HashedColors {
    pub fn color_at(position: usize) -> u32 {
        (position as u32).wrapping_add(1000).wrapping_mul(409_020) & 0x00FF_FFFF
    }
}

impl ColorSource for HashedColors {
    fn corner_colors(&self, triangle: usize) -> [u32; 3] {
        let first = triangle * 3;
        [0, 1, 2].map(|corner| Self::color_at(first + corner))
    }
}

/// The same three corner colors for every triangle.
#[derive(Debug, Clone, Copy)]
pub struct SolidColors(pub [u32; 3]);

impl ColorSource for SolidColors {
    fn corner_colors(&self, _triangle: usize) -> [u32; 3] {
        self.0
    }
}

/// Inclusive pixel bounds of a triangle, clamped to the framebuffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub x_min: i32,
    pub y_min: i32,
    pub x_max: i32,
    pub y_max: i32,
}

impl BoundingBox {
    /// `None` when the clamped box is empty or a corner is not finite.
    pub fn of_triangle(corners: &[Vec4; 3], width: usize, height: usize) -> Option<Self> {
        if corners.iter().any(|c| !c.x.is_finite() || !c.y.is_finite()) {
            return None;
        }
        let min_x = corners.iter().map(|c| c.x).fold(f32::INFINITY, f32::min);
        let max_x = corners.iter().map(|c| c.x).fold(f32::NEG_INFINITY, f32::max);
        let min_y = corners.iter().map(|c| c.y).fold(f32::INFINITY, f32::min);
        let max_y = corners.iter().map(|c| c.y).fold(f32::NEG_INFINITY, f32::max);

        let bbox = Self {
            x_min: (min_x.floor() as i32).max(0),
            y_min: (min_y.floor() as i32).max(0),
            x_max: (max_x.ceil() as i32).min(width as i32 - 1),
            y_max: (max_y.ceil() as i32).min(height as i32 - 1),
        };
        if bbox.x_min > bbox.x_max || bbox.y_min > bbox.y_max {
            return None;
        }
        Some(bbox)
    }
}

/// Barycentric weights of `p` in triangle `(a, b, c)`.
///
/// Any negative weight means `p` is outside. Triangles whose doubled area is
/// below one pixel report `(-1, 1, 1)`.
pub fn barycentric(a: Vec2, b: Vec2, c: Vec2, p: Vec2) -> Vec3 {
    let ex = Vec3::new(c.x - a.x, b.x - a.x, a.x - p.x);
    let ey = Vec3::new(c.y - a.y, b.y - a.y, a.y - p.y);
    let u = cross(&ex, &ey);

    if u.z.abs() < 1.0 {
        return Vec3::new(-1.0, 1.0, 1.0);
    }
    Vec3::new(1.0 - (u.x + u.y) / u.z, u.y / u.z, u.x / u.z)
}

/// Twice the signed screen-space area is below one pixel.
pub fn is_degenerate(corners: &[Vec4; 3]) -> bool {
    let [a, b, c] = corners;
    let area2 = (c.x - a.x) * (b.y - a.y) - (b.x - a.x) * (c.y - a.y);
    area2.is_nan() || area2.abs() < 1.0
}

/// Blend three corner colors with barycentric weights.
#[inline]
pub fn shade(colors: [u32; 3], weights: &Vec3) -> u32 {
    saturating_add(
        saturating_add(scale(colors[0], weights.x), scale(colors[1], weights.y)),
        scale(colors[2], weights.z),
    )
}

/// Depth-tested fill of one screen-space triangle. Returns the number of
/// pixels written.
pub fn fill_triangle(fb: &mut Framebuffer, corners: &[Vec4; 3], colors: [u32; 3]) -> usize {
    let Some(bbox) = BoundingBox::of_triangle(corners, fb.width(), fb.height()) else {
        return 0;
    };
    let [a, b, c] = corners.map(|v| v.xy());

    let mut written = 0;
    for y in bbox.y_min..=bbox.y_max {
        for x in bbox.x_min..=bbox.x_max {
            let w = barycentric(a, b, c, Vec2::new(x as f32, y as f32));
            if w.x < 0.0 || w.y < 0.0 || w.z < 0.0 {
                continue;
            }

            let depth = corners[0].z * w.x + corners[1].z * w.y + corners[2].z * w.z;
            if fb.test_and_set_depth(x, y, depth) {
                fb.set_pixel(x, y, shade(colors, &w));
                written += 1;
            }
        }
    }
    written
}

/// Per-frame counters from [`Rasterizer::render_mesh`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub triangles_rasterized: usize,
    pub triangles_skipped: usize,
    pub pixels_written: usize,
}

/// Fills triangles with colors from a [`ColorSource`].
#[derive(Debug, Clone, Default)]
pub struct Rasterizer<C = HashedColors> {
    colors: C,
}

impl<C: ColorSource> Rasterizer<C> {
    pub fn new(colors: C) -> Self {
        Self { colors }
    }

    pub fn color_source(&self) -> &C {
        &self.colors
    }

    /// Rasterize one screen-space triangle. Returns the number of pixels written.
    pub fn triangle(&self, fb: &mut Framebuffer, corners: &[Vec4; 3], triangle: usize) -> usize {
        fill_triangle(fb, corners, self.colors.corner_colors(triangle))
    }

    /// Project and rasterize every triangle of `mesh`.
    ///
    /// Vertices are divided by `w` before the viewport matrix is applied.
    /// Triangles with a vertex at `w == 0` or with no screen-space area are
    /// skipped.
    pub fn render_mesh(&self, fb: &mut Framebuffer, mesh: &Mesh, view_projection: &Mat4) -> FrameStats {
        let screen = viewport(0.0, 0.0, fb.width() as f32, fb.height() as f32);
        let mut stats = FrameStats::default();

        for (triangle, indices) in mesh.triangles().enumerate() {
            let projected = indices.map(|i| {
                mesh.vertices
                    .get(i as usize)
                    .and_then(|v| project_vertex(&v.position, view_projection, &screen))
            });
            let corners = match projected {
                [Some(a), Some(b), Some(c)] => [a, b, c],
                _ => {
                    log::trace!("skipping triangle {triangle}: vertex not projectable");
                    stats.triangles_skipped += 1;
                    continue;
                }
            };
            if is_degenerate(&corners) {
                log::trace!("skipping triangle {triangle}: zero screen area");
                stats.triangles_skipped += 1;
                continue;
            }

            stats.pixels_written += self.triangle(fb, &corners, triangle);
            stats.triangles_rasterized += 1;
        }
        stats
    }
}

/// Bresenham line with colors interpolated from `color0` to `color1`.
///
/// Both endpoints are drawn. No depth test: the line lands on top of whatever
/// is in the color buffer.
pub fn draw_line(
    fb: &mut Framebuffer,
    x0: i32,
    y0: i32,
    x1: i32,
    y1: i32,
    color0: u32,
    color1: u32,
) {
    let (mut x0, mut y0, mut x1, mut y1) = (x0 as i64, y0 as i64, x1 as i64, y1 as i64);
    let (mut color0, mut color1) = (color0, color1);

    let steep = (x0 - x1).abs() < (y0 - y1).abs();
    if steep {
        std::mem::swap(&mut x0, &mut y0);
        std::mem::swap(&mut x1, &mut y1);
    }
    if x0 > x1 {
        std::mem::swap(&mut x0, &mut x1);
        std::mem::swap(&mut y0, &mut y1);
        std::mem::swap(&mut color0, &mut color1);
    }

    let dx = x1 - x0;
    let derror2 = (y1 - y0).abs() * 2;
    let step = if y1 > y0 { 1 } else { -1 };
    let mut error2 = 0;
    let mut y = y0;
    for x in x0..=x1 {
        let t = if dx == 0 {
            0.0
        } else {
            (x - x0) as f32 / dx as f32
        };
        let color = lerp(color0, color1, t);
        if steep {
            fb.set_pixel(y as i32, x as i32, color);
        } else {
            fb.set_pixel(x as i32, y as i32, color);
        }
        error2 += derror2;
        if error2 > dx {
            y += step;
            error2 -= dx * 2;
        }
    }
}
