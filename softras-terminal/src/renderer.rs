//! Presents a finished framebuffer in the terminal.
use crossterm::{
    cursor,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    QueueableCommand,
};
use softras_core::color::unpack;
use softras_core::Framebuffer;
use std::io::Write;

/// Upper half block: foreground paints the top pixel, background the bottom.
const HALF_BLOCK: char = '\u{2580}';

/// Stretches a framebuffer over a `cols x rows` cell grid, two pixel rows per
/// cell, with nearest-neighbour sampling.
///
/// Framebuffer row 0 is the bottom of the image, so rows are flipped.
pub struct HalfBlockPresenter {
    cols: usize,
    rows: usize,
}

impl HalfBlockPresenter {
    pub fn new(cols: usize, rows: usize) -> Self {
        Self { cols, rows }
    }

    pub fn resize(&mut self, cols: usize, rows: usize) {
        self.cols = cols;
        self.rows = rows;
    }

    /// Framebuffer size that maps one pixel to each half cell.
    pub fn native_size(&self) -> (usize, usize) {
        (self.cols.max(1), (self.rows * 2).max(1))
    }

    fn sample(&self, fb: &Framebuffer, col: usize, pixel_row: usize) -> Color {
        let x = col * fb.width() / self.cols.max(1);
        let y = pixel_row * fb.height() / (self.rows * 2).max(1);
        let flipped = fb.height() - 1 - y.min(fb.height() - 1);
        let (r, g, b) = unpack(fb.pixel(x as i32, flipped as i32).unwrap_or(0));
        Color::Rgb { r, g, b }
    }

    pub fn draw<W: Write>(&self, fb: &Framebuffer, writer: &mut W) -> std::io::Result<()> {
        let mut current: Option<(Color, Color)> = None;
        for row in 0..self.rows {
            writer.queue(cursor::MoveTo(0, row as u16))?;
            for col in 0..self.cols {
                let top = self.sample(fb, col, row * 2);
                let bottom = self.sample(fb, col, row * 2 + 1);
                if current != Some((top, bottom)) {
                    writer.queue(SetForegroundColor(top))?;
                    writer.queue(SetBackgroundColor(bottom))?;
                    current = Some((top, bottom));
                }
                writer.queue(Print(HALF_BLOCK))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}
