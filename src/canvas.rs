//! Software drawing surface: a packed-RGB pixel buffer plus the few
//! primitives the renderer needs (rects, lines, circles, HUD text).

use crate::color::{self, Color};
use crate::font::{self, GLYPH_HEIGHT, GLYPH_WIDTH};
use crate::vector::Vector2;

pub struct Canvas {
    pixels: Vec<u32>,
    width: usize,
    height: usize,
}

impl Canvas {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            pixels: vec![color::BLACK; width * height],
            width,
            height,
        }
    }

    /// Resizes the buffer. Contents are cleared.
    pub fn set_size(&mut self, width: usize, height: usize) {
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.pixels = vec![color::BLACK; width * height];
        } else {
            self.clear();
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> Option<Color> {
        if x < self.width && y < self.height {
            Some(self.pixels[y * self.width + x])
        } else {
            None
        }
    }

    pub fn clear(&mut self) {
        self.fill(color::BLACK);
    }

    pub fn fill(&mut self, c: Color) {
        self.pixels.fill(c);
    }

    #[inline]
    fn put(&mut self, x: i32, y: i32, c: Color) {
        if x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height {
            self.pixels[y as usize * self.width + x as usize] = c;
        }
    }

    #[inline]
    fn put_blend(&mut self, x: i32, y: i32, c: Color, alpha: f32) {
        if x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height {
            let idx = y as usize * self.width + x as usize;
            self.pixels[idx] = color::blend(self.pixels[idx], c, alpha);
        }
    }

    /// Pixel span `[start, end)` covered by `[pos, pos + len)` on an axis of `limit` pixels.
    fn span(pos: f32, len: f32, limit: usize) -> Option<(usize, usize)> {
        if !(pos.is_finite() && len.is_finite()) || len <= 0.0 {
            return None;
        }
        let start = pos.round().max(0.0) as usize;
        let end = ((pos + len).round().max(0.0) as usize).min(limit);
        (start < end).then_some((start, end))
    }

    pub fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, c: Color) {
        let (Some((x0, x1)), Some((y0, y1))) = (
            Self::span(x, w, self.width),
            Self::span(y, h, self.height),
        ) else {
            return;
        };
        for row in y0..y1 {
            let base = row * self.width;
            self.pixels[base + x0..base + x1].fill(c);
        }
    }

    /// One pixel outline, alpha blended over what is already there.
    pub fn stroke_rect(&mut self, x: f32, y: f32, w: f32, h: f32, c: Color, alpha: f32) {
        let (Some((x0, x1)), Some((y0, y1))) = (
            Self::span(x, w, self.width),
            Self::span(y, h, self.height),
        ) else {
            return;
        };
        let (x0, x1, y0, y1) = (x0 as i32, x1 as i32 - 1, y0 as i32, y1 as i32 - 1);
        for px in x0..=x1 {
            self.put_blend(px, y0, c, alpha);
            if y1 != y0 {
                self.put_blend(px, y1, c, alpha);
            }
        }
        for py in (y0 + 1)..y1 {
            self.put_blend(x0, py, c, alpha);
            if x1 != x0 {
                self.put_blend(x1, py, c, alpha);
            }
        }
    }

    /// Bresenham line, clipped per pixel.
    pub fn draw_line(&mut self, from: Vector2, to: Vector2, c: Color) {
        if !(from.x.is_finite() && from.y.is_finite() && to.x.is_finite() && to.y.is_finite()) {
            return;
        }
        let (mut x0, mut y0) = (from.x.round() as i32, from.y.round() as i32);
        let (x1, y1) = (to.x.round() as i32, to.y.round() as i32);

        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.put(x0, y0, c);
            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                err += dx;
                y0 += sy;
            }
        }
    }

    pub fn fill_circle(&mut self, center: Vector2, radius: f32, c: Color) {
        if !(center.x.is_finite() && center.y.is_finite()) || radius <= 0.0 {
            return;
        }
        let r = radius.ceil() as i32;
        let (cx, cy) = (center.x.round() as i32, center.y.round() as i32);
        let r2 = radius * radius;
        for dy in -r..=r {
            for dx in -r..=r {
                if (dx * dx + dy * dy) as f32 <= r2 {
                    self.put(cx + dx, cy + dy, c);
                }
            }
        }
    }

    /// Draws `text` with its top-left corner at `pos`. Unknown characters
    /// advance the cursor without drawing.
    pub fn draw_text(&mut self, text: &str, pos: Vector2, scale: usize, c: Color) {
        let scale = scale.max(1) as i32;
        let (mut pen_x, top) = (pos.x.round() as i32, pos.y.round() as i32);
        for ch in text.chars() {
            if let Some(rows) = font::glyph(ch) {
                for (gy, bits) in rows.into_iter().enumerate() {
                    for gx in 0..GLYPH_WIDTH {
                        if bits & (1u8 << (GLYPH_WIDTH - 1 - gx)) == 0 {
                            continue;
                        }
                        let px = pen_x + gx as i32 * scale;
                        let py = top + gy as i32 * scale;
                        for sy in 0..scale {
                            for sx in 0..scale {
                                self.put(px + sx, py + sy, c);
                            }
                        }
                    }
                }
            }
            pen_x += (GLYPH_WIDTH as i32 + 1) * scale;
        }
    }

    /// Text over a hard drop shadow offset straight down.
    pub fn draw_text_shadowed(
        &mut self,
        text: &str,
        pos: Vector2,
        scale: usize,
        c: Color,
        shadow: Color,
        offset: f32,
    ) {
        self.draw_text(text, pos + Vector2::new(0.0, offset), scale, shadow);
        self.draw_text(text, pos, scale, c);
    }

    pub fn text_height(scale: usize) -> usize {
        GLYPH_HEIGHT * scale.max(1)
    }

    /// Copies this canvas into `dst` (row stride `dst_width`) at `(x, y)`, clipped.
    pub fn draw_to(&self, dst: &mut [u32], dst_width: usize, x: usize, y: usize) {
        if dst_width == 0 || x >= dst_width {
            return;
        }
        let dst_height = dst.len() / dst_width;
        let cols = self.width.min(dst_width - x);
        for row in 0..self.height {
            let dy = y + row;
            if dy >= dst_height {
                break;
            }
            let src = &self.pixels[row * self.width..row * self.width + cols];
            let start = dy * dst_width + x;
            dst[start..start + cols].copy_from_slice(src);
        }
    }
}
