//! Binary `.v` model format.
//!
//! Layout, all little-endian and unpadded:
//!
//! ```text
//! u32 index_count | u32 vertex_count | u16 indices[index_count] | f32 vertices[vertex_count][8]
//! ```
//!
//! Each vertex record is position.xyz, normal.xyz, texcoord.xy.
use nom::{
    multi::count,
    number::complete::{le_f32, le_u16, le_u32},
    sequence::tuple,
    IResult,
};

use crate::error::MeshError;
use crate::geometry::{Mesh, Vertex};
use crate::math::{Vec2, Vec3};

const HEADER_SIZE: u64 = 8;
const INDEX_SIZE: u64 = 2;
const VERTEX_SIZE: u64 = 8 * 4;

/// Number of bytes a model with the given counts occupies.
pub fn encoded_len(index_count: u32, vertex_count: u32) -> u64 {
    HEADER_SIZE + INDEX_SIZE * index_count as u64 + VERTEX_SIZE * vertex_count as u64
}

/// Decode a `.v` model from memory.
pub fn parse_vmodel(data: &[u8]) -> Result<Mesh, MeshError> {
    let (rest, (index_count, vertex_count)) =
        header(data).map_err(|_| MeshError::Truncated {
            expected: HEADER_SIZE,
            actual: data.len(),
        })?;

    let expected = encoded_len(index_count, vertex_count);
    if (data.len() as u64) < expected {
        return Err(MeshError::Truncated {
            expected,
            actual: data.len(),
        });
    }
    if index_count % 3 != 0 {
        return Err(MeshError::PartialTriangle { index_count });
    }

    let (rest, indices) = count(le_u16, index_count as usize)(rest)
        .map_err(|e: nom::Err<nom::error::Error<&[u8]>>| MeshError::Parse(e.to_string()))?;
    let (rest, vertices) = count(vertex, vertex_count as usize)(rest)
        .map_err(|e: nom::Err<nom::error::Error<&[u8]>>| MeshError::Parse(e.to_string()))?;

    if let Some(position) = indices.iter().position(|&i| i as u32 >= vertex_count) {
        return Err(MeshError::IndexOutOfRange {
            position,
            index: indices[position],
            vertex_count,
        });
    }

    if !rest.is_empty() {
        log::debug!("ignoring {} trailing bytes after model data", rest.len());
    }
    log::debug!(
        "decoded model: {} triangles, {} vertices",
        index_count / 3,
        vertex_count
    );

    Ok(Mesh::new(indices, vertices))
}

/// Encode a mesh in the `.v` layout understood by [`parse_vmodel`].
pub fn encode_vmodel(mesh: &Mesh) -> Vec<u8> {
    let mut out = Vec::with_capacity(
        encoded_len(mesh.indices.len() as u32, mesh.vertices.len() as u32) as usize,
    );
    out.extend_from_slice(&(mesh.indices.len() as u32).to_le_bytes());
    out.extend_from_slice(&(mesh.vertices.len() as u32).to_le_bytes());
    for index in &mesh.indices {
        out.extend_from_slice(&index.to_le_bytes());
    }
    for v in &mesh.vertices {
        let fields = [
            v.position.x,
            v.position.y,
            v.position.z,
            v.normal.x,
            v.normal.y,
            v.normal.z,
            v.texcoord.x,
            v.texcoord.y,
        ];
        for f in fields {
            out.extend_from_slice(&f.to_le_bytes());
        }
    }
    out
}

fn header(input: &[u8]) -> IResult<&[u8], (u32, u32)> {
    tuple((le_u32, le_u32))(input)
}

fn vec3(input: &[u8]) -> IResult<&[u8], Vec3> {
    let (input, (x, y, z)) = tuple((le_f32, le_f32, le_f32))(input)?;
    Ok((input, Vec3::new(x, y, z)))
}

fn vertex(input: &[u8]) -> IResult<&[u8], Vertex> {
    let (input, position) = vec3(input)?;
    let (input, normal) = vec3(input)?;
    let (input, (u, v)) = tuple((le_f32, le_f32))(input)?;
    Ok((input, Vertex::new(position, normal, Vec2::new(u, v))))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle_mesh() -> Mesh {
        Mesh::new(
            vec![0, 1, 2],
            vec![
                Vertex::new(
                    Vec3::new(-1.0, 0.5, 2.0),
                    Vec3::new(0.0, 0.0, 1.0),
                    Vec2::new(0.0, 0.0),
                ),
                Vertex::new(
                    Vec3::new(1.25, -3.0, 0.0),
                    Vec3::new(0.0, 1.0, 0.0),
                    Vec2::new(1.0, 0.0),
                ),
                Vertex::new(
                    Vec3::new(0.0, 7.5, -4.0),
                    Vec3::new(1.0, 0.0, 0.0),
                    Vec2::new(0.5, 1.0),
                ),
            ],
        )
    }

    #[test]
    fn test_round_trip() {
        let mesh = triangle_mesh();
        let bytes = encode_vmodel(&mesh);
        assert_eq!(bytes.len() as u64, encoded_len(3, 3));
        assert_eq!(parse_vmodel(&bytes).unwrap(), mesh);
    }

    #[test]
    fn test_layout_is_little_endian() {
        let bytes = encode_vmodel(&triangle_mesh());
        assert_eq!(&bytes[0..4], &[3, 0, 0, 0]);
        assert_eq!(&bytes[4..8], &[3, 0, 0, 0]);
        assert_eq!(&bytes[8..14], &[0, 0, 1, 0, 2, 0]);
        assert_eq!(&bytes[14..18], &(-1.0f32).to_le_bytes());
    }

    #[test]
    fn test_empty_model() {
        let mut data = Vec::new();
        data.extend_from_slice(&0u32.to_le_bytes());
        data.extend_from_slice(&0u32.to_le_bytes());
        let mesh = parse_vmodel(&data).unwrap();
        assert!(mesh.indices.is_empty());
        assert!(mesh.vertices.is_empty());
    }

    #[test]
    fn test_short_header() {
        let err = parse_vmodel(&[1, 0, 0]).unwrap_err();
        assert_eq!(
            err,
            MeshError::Truncated {
                expected: 8,
                actual: 3
            }
        );
    }

    #[test]
    fn test_truncated_payload() {
        let bytes = encode_vmodel(&triangle_mesh());
        let err = parse_vmodel(&bytes[..bytes.len() - 1]).unwrap_err();
        assert_eq!(
            err,
            MeshError::Truncated {
                expected: bytes.len() as u64,
                actual: bytes.len() - 1
            }
        );
    }

    #[test]
    fn test_huge_counts_do_not_overflow() {
        let mut data = Vec::new();
        data.extend_from_slice(&u32::MAX.to_le_bytes());
        data.extend_from_slice(&u32::MAX.to_le_bytes());
        assert!(matches!(
            parse_vmodel(&data),
            Err(MeshError::Truncated { .. })
        ));
    }

    #[test]
    fn test_index_out_of_range() {
        let mut mesh = triangle_mesh();
        mesh.indices[1] = 3;
        let err = parse_vmodel(&encode_vmodel(&mesh)).unwrap_err();
        assert_eq!(
            err,
            MeshError::IndexOutOfRange {
                position: 1,
                index: 3,
                vertex_count: 3
            }
        );
    }

    #[test]
    fn test_partial_triangle() {
        let mut mesh = triangle_mesh();
        mesh.indices.push(0);
        let err = parse_vmodel(&encode_vmodel(&mesh)).unwrap_err();
        assert_eq!(err, MeshError::PartialTriangle { index_count: 4 });
    }

    #[test]
    fn test_trailing_bytes_ignored() {
        let mesh = triangle_mesh();
        let mut bytes = encode_vmodel(&mesh);
        bytes.extend_from_slice(&[0xAB; 5]);
        assert_eq!(parse_vmodel(&bytes).unwrap(), mesh);
    }
}
