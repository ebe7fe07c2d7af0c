//! Color and depth targets for the rasterizer.
use crate::error::Error;

/// Far-plane sentinel for freshly created depth buffers.
pub const CLEAR_DEPTH: f32 = 1.0;

/// Largest accepted `width * height`; both buffers together stay under 2 GiB.
pub const MAX_PIXELS: usize = 1 << 28;

/// Overwrite the first `width * height` words of `buffer` with `pattern`.
///
/// Shared by both targets: the depth buffer is filled with the bit pattern of
/// the clear depth.
pub fn fill(buffer: &mut [u32], width: usize, height: usize, pattern: u32) {
    let len = (width * height).min(buffer.len());
    buffer[..len].fill(pattern);
}

/// A packed-color buffer and a depth buffer of identical row-major layout.
///
/// Smaller depth values are nearer. Out-of-range coordinates are ignored by
/// every accessor.
#[derive(Debug, Clone)]
pub struct Framebuffer {
    width: usize,
    height: usize,
    color: Vec<u32>,
    depth: Vec<f32>,
}

impl Framebuffer {
    pub fn new(width: usize, height: usize) -> Result<Self, Error> {
        let size = check_size(width, height)?;
        Ok(Self {
            width,
            height,
            color: vec![0; size],
            depth: vec![CLEAR_DEPTH; size],
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Reallocate both buffers for a new resolution. Contents are reset.
    pub fn resize(&mut self, width: usize, height: usize) -> Result<(), Error> {
        let size = check_size(width, height)?;
        if (width, height) == (self.width, self.height) {
            return Ok(());
        }
        log::debug!(
            "resizing framebuffer {}x{} -> {}x{}",
            self.width,
            self.height,
            width,
            height
        );
        self.width = width;
        self.height = height;
        self.color = vec![0; size];
        self.depth = vec![CLEAR_DEPTH; size];
        Ok(())
    }

    pub fn clear(&mut self, color: u32, depth: f32) {
        fill(&mut self.color, self.width, self.height, color);
        fill(
            bytemuck::cast_slice_mut(self.depth.as_mut_slice()),
            self.width,
            self.height,
            depth.to_bits(),
        );
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(y * self.width + x)
    }

    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, color: u32) {
        if let Some(idx) = self.index(x, y) {
            self.color[idx] = color;
        }
    }

    /// Store `depth` if it is not farther than the current value.
    ///
    /// Returns whether the test passed.
    #[inline]
    pub fn test_and_set_depth(&mut self, x: i32, y: i32, depth: f32) -> bool {
        match self.index(x, y) {
            Some(idx) if depth <= self.depth[idx] => {
                self.depth[idx] = depth;
                true
            }
            _ => false,
        }
    }

    pub fn pixel(&self, x: i32, y: i32) -> Option<u32> {
        self.index(x, y).map(|idx| self.color[idx])
    }

    pub fn depth(&self, x: i32, y: i32) -> Option<f32> {
        self.index(x, y).map(|idx| self.depth[idx])
    }

    /// Finished color buffer for presentation, row-major.
    pub fn color_pixels(&self) -> &[u32] {
        &self.color
    }

    pub fn depth_pixels(&self) -> &[f32] {
        &self.depth
    }
}

/// Pixel count of a `width x height` target, if it is non-empty and not
/// larger than [`MAX_PIXELS`].
fn check_size(width: usize, height: usize) -> Result<usize, Error> {
    match width.checked_mul(height) {
        Some(size) if size > 0 && size <= MAX_PIXELS => Ok(size),
        _ => Err(Error::InvalidSize { width, height }),
    }
}
