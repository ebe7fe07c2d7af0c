//! Fixed-point blending on packed `0xAARRGGBB` color words.
//!
//! Red and blue sit in non-adjacent byte lanes, so both are weighted with a
//! single multiply and mask; alpha and green share the second pass. Weights
//! are 8.8 fixed point: `t` in `[0, 1]` becomes `round(256 * t)`.

/// Red and blue lanes.
const RB: u32 = 0x00FF_00FF;
/// Alpha and green lanes.
const AG: u32 = 0xFF00_FF00;

pub const BLACK: u32 = 0x0000_0000;
pub const WHITE: u32 = 0x00FF_FFFF;

pub fn pack(r: u8, g: u8, b: u8) -> u32 {
    (r as u32) << 16 | (g as u32) << 8 | b as u32
}

pub fn unpack(color: u32) -> (u8, u8, u8) {
    ((color >> 16) as u8, (color >> 8) as u8, color as u8)
}

fn weight(t: f32) -> u32 {
    (t.clamp(0.0, 1.0) * 256.0).round() as u32
}

/// Per-channel linear interpolation from `a` (`t = 0`) to `b` (`t = 1`).
#[inline]
pub fn lerp(a: u32, b: u32, t: f32) -> u32 {
    let f2 = weight(t);
    let f1 = 256 - f2;

    let rb = (((a & RB) * f1 + (b & RB) * f2) >> 8) & RB;
    let ag = ((((a >> 8) & RB) * f1 + ((b >> 8) & RB) * f2)) & AG;
    rb | ag
}

/// Multiply every channel by `t`.
#[inline]
pub fn scale(color: u32, t: f32) -> u32 {
    let f = weight(t);

    let rb = (((color & RB) * f) >> 8) & RB;
    let ag = (((color >> 8) & RB) * f) & AG;
    rb | ag
}

/// Per-channel addition clamped at 0xFF; no carry crosses a lane.
#[inline]
pub fn saturating_add(a: u32, b: u32) -> u32 {
    let rb = saturate_lanes((a & RB) + (b & RB));
    let ag = saturate_lanes(((a >> 8) & RB) + ((b >> 8) & RB));
    rb | ag << 8
}

/// Clamp two 9-bit lane sums (bits 0..9 and 16..25) back to 8 bits.
fn saturate_lanes(sum: u32) -> u32 {
    let carry = sum & 0x0100_0100;
    (sum | (carry - (carry >> 8))) & RB
}
