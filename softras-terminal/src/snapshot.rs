//! Binary PPM (P6) export of the color buffer.
use softras_core::color::unpack;
use softras_core::Framebuffer;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Write `fb` as a P6 image, top row first.
pub fn write_ppm<W: Write>(fb: &Framebuffer, writer: &mut W) -> io::Result<()> {
    write!(writer, "P6\n{} {}\n255\n", fb.width(), fb.height())?;
    let mut row = Vec::with_capacity(fb.width() * 3);
    for y in (0..fb.height()).rev() {
        row.clear();
        let start = y * fb.width();
        for &pixel in &fb.color_pixels()[start..start + fb.width()] {
            let (r, g, b) = unpack(pixel);
            row.extend_from_slice(&[r, g, b]);
        }
        writer.write_all(&row)?;
    }
    Ok(())
}

pub fn save_ppm<P: AsRef<Path>>(fb: &Framebuffer, path: P) -> io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_ppm(fb, &mut writer)?;
    writer.flush()
}
