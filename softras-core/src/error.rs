use thiserror::Error;

/// A model buffer that cannot be turned into a [`Mesh`](crate::Mesh).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MeshError {
    #[error("model data truncated: expected {expected} bytes, found {actual}")]
    Truncated { expected: u64, actual: usize },

    #[error("index {index} at position {position} references a missing vertex (vertex count {vertex_count})")]
    IndexOutOfRange {
        position: usize,
        index: u16,
        vertex_count: u32,
    },

    #[error("index count {index_count} is not a multiple of 3")]
    PartialTriangle { index_count: u32 },

    #[error("failed to parse model data: {0}")]
    Parse(String),
}

/// Errors from setting up render targets.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("invalid framebuffer size {width}x{height}")]
    InvalidSize { width: usize, height: usize },
}
