//! Packed `0x00RRGGBB` colours, the pixel format softbuffer presents.

pub type Color = u32;

pub const WHITE: Color = rgb(255, 255, 255);
pub const BLACK: Color = rgb(0, 0, 0);

#[inline]
pub const fn rgb(r: u8, g: u8, b: u8) -> Color {
    (b as u32) | ((g as u32) << 8) | ((r as u32) << 16)
}

#[inline]
pub const fn channels(c: Color) -> (u8, u8, u8) {
    (((c >> 16) & 0xFF) as u8, ((c >> 8) & 0xFF) as u8, (c & 0xFF) as u8)
}

/// Parses `#RRGGBB` (the leading `#` is optional).
pub fn from_hex(hex: &str) -> Option<Color> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 {
        return None;
    }
    u32::from_str_radix(digits, 16).ok()
}

/// Darkens every channel by `percent` (0 keeps the colour, 100 is black).
pub fn darken(color: Color, percent: f32) -> Color {
    let keep = (100.0 - percent.clamp(0.0, 100.0)) / 100.0;
    let (r, g, b) = channels(color);
    let scale = |c: u8| (c as f32 * keep).floor().min(255.0) as u8;
    rgb(scale(r), scale(g), scale(b))
}

/// Source-over blend of `src` onto `dst` with `alpha` in `[0, 1]`.
pub fn blend(dst: Color, src: Color, alpha: f32) -> Color {
    let a = alpha.clamp(0.0, 1.0);
    let (dr, dg, db) = channels(dst);
    let (sr, sg, sb) = channels(src);
    let mix = |d: u8, s: u8| (d as f32 + (s as f32 - d as f32) * a).round() as u8;
    rgb(mix(dr, sr), mix(dg, sg), mix(db, sb))
}
