//! softras core - a single-threaded software rasterization pipeline.
//!
//! Meshes are projected with a row-vector model-view-projection chain,
//! divided by `w`, mapped through a viewport matrix and filled into a
//! [`Framebuffer`] with barycentric depth testing and packed-color shading.
//! Nothing here touches files, windows or clocks.

pub mod color;
pub mod error;
pub mod framebuffer;
pub mod geometry;
pub mod math;
pub mod projection;
pub mod raster;
pub mod transform;
pub mod vmodel;

// Re-export commonly used types
pub use error::{Error, MeshError};
pub use framebuffer::Framebuffer;
pub use geometry::{Mesh, Vertex};
pub use projection::Camera;
pub use raster::{draw_line, ColorSource, FrameStats, HashedColors, Rasterizer, SolidColors};
pub use transform::{RotationState, Transform};
pub use vmodel::{encode_vmodel, parse_vmodel};
