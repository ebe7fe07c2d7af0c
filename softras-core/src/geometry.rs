//! Indexed triangle meshes consumed by the rasterizer.
use crate::math::{Vec2, Vec3};

/// A mesh vertex. Normal and texcoord are carried for future shading models.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vertex {
    pub position: Vec3,
    pub normal: Vec3,
    pub texcoord: Vec2,
}

impl Vertex {
    pub fn new(position: Vec3, normal: Vec3, texcoord: Vec2) -> Self {
        Self {
            position,
            normal,
            texcoord,
        }
    }

    pub fn from_position(x: f32, y: f32, z: f32) -> Self {
        Self {
            position: Vec3::new(x, y, z),
            ..Self::default()
        }
    }
}

/// An indexed triangle list.
///
/// Every triple of `indices` is one triangle and every index is below
/// `vertices.len()`. Meshes are built once and never mutated while rendering.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Mesh {
    pub indices: Vec<u16>,
    pub vertices: Vec<Vertex>,
}

impl Mesh {
    pub fn new(indices: Vec<u16>, vertices: Vec<Vertex>) -> Self {
        Self { indices, vertices }
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Index triples in stream order.
    pub fn triangles(&self) -> impl Iterator<Item = [u16; 3]> + '_ {
        self.indices
            .chunks_exact(3)
            .map(|tri| [tri[0], tri[1], tri[2]])
    }

    /// Create an axis-aligned cube centred on the origin, four vertices per
    /// face so each face keeps its own normal.
    pub fn cube(size: f32) -> Self {
        let half = size / 2.0;
        let faces: [(Vec3, Vec3, Vec3); 6] = [
            // (normal, u axis, v axis)
            (Vec3::z(), Vec3::x(), Vec3::y()),
            (-Vec3::z(), -Vec3::x(), Vec3::y()),
            (Vec3::y(), Vec3::x(), -Vec3::z()),
            (-Vec3::y(), Vec3::x(), Vec3::z()),
            (Vec3::x(), -Vec3::z(), Vec3::y()),
            (-Vec3::x(), Vec3::z(), Vec3::y()),
        ];
        let corners = [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)];

        let mut vertices = Vec::with_capacity(24);
        let mut indices = Vec::with_capacity(36);
        for (normal, u, v) in faces {
            let base = vertices.len() as u16;
            for (cu, cv) in corners {
                let position = (normal + u * cu + v * cv) * half;
                let texcoord = Vec2::new((cu + 1.0) / 2.0, (cv + 1.0) / 2.0);
                vertices.push(Vertex::new(position, normal, texcoord));
            }
            indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
        }

        Self { indices, vertices }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::normalize;
    use approx::assert_relative_eq;

    fn face_normal(mesh: &Mesh, [a, b, c]: [u16; 3]) -> Vec3 {
        let p = |i: u16| mesh.vertices[i as usize].position;
        normalize(&(p(b) - p(a)).cross(&(p(c) - p(a))))
    }

    #[test]
    fn test_cube_layout() {
        let cube = Mesh::cube(2.0);
        assert_eq!(cube.vertices.len(), 24);
        assert_eq!(cube.triangle_count(), 12);
        assert!(cube
            .indices
            .iter()
            .all(|&i| (i as usize) < cube.vertices.len()));
        for v in &cube.vertices {
            assert_relative_eq!(v.position.abs().max(), 1.0);
        }
    }

    #[test]
    fn test_cube_winding_faces_outward() {
        let cube = Mesh::cube(2.0);
        for tri in cube.triangles() {
            let normal = face_normal(&cube, tri);
            let stored = cube.vertices[tri[0] as usize].normal;
            assert_relative_eq!(normal, stored, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_triangles_iterates_triples() {
        let mesh = Mesh::new(vec![0, 1, 2, 2, 1, 0], vec![Vertex::default(); 3]);
        let tris: Vec<_> = mesh.triangles().collect();
        assert_eq!(tris, vec![[0, 1, 2], [2, 1, 0]]);
    }
}
