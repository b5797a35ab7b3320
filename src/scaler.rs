//! Stretches the logical framebuffer onto the window buffer.

use rayon::{
    iter::{IndexedParallelIterator, IntoParallelRefIterator, ParallelIterator},
    slice::ParallelSliceMut,
};

/// Two source samples and the 8-bit weight of the second.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Tap {
    near: usize,
    far: usize,
    weight: u32,
}

/// Centre-aligned sample positions for every destination pixel on one axis.
fn taps(src_len: usize, dst_len: usize) -> Vec<Tap> {
    let last = src_len.saturating_sub(1);
    let ratio = src_len as f32 / dst_len.max(1) as f32;
    (0..dst_len)
        .map(|d| {
            let pos = ((d as f32 + 0.5) * ratio - 0.5).max(0.0);
            let near = (pos.floor() as usize).min(last);
            Tap {
                near,
                far: (near + 1).min(last),
                weight: ((pos - near as f32) * 256.0).round().clamp(0.0, 256.0) as u32,
            }
        })
        .collect()
}

/// Blends two packed `0x00RRGGBB` pixels, `w` in `[0, 256]` towards `b`.
#[inline]
fn mix(a: u32, b: u32, w: u32) -> u32 {
    let inv = 256 - w;
    // red and blue share one multiply, green gets its own
    let rb = (((a & 0x00FF_00FF) * inv + (b & 0x00FF_00FF) * w) >> 8) & 0x00FF_00FF;
    let g = (((a & 0x0000_FF00) * inv + (b & 0x0000_FF00) * w) >> 8) & 0x0000_FF00;
    rb | g
}

/// Bilinear upscaler with per-axis lookup tables, rebuilt on resize.
pub struct Upscaler {
    src_w: usize,
    src_h: usize,
    dst_w: usize,
    dst_h: usize,
    cols: Vec<Tap>,
    rows: Vec<Tap>,
}

impl Upscaler {
    pub fn new(src_w: usize, src_h: usize, dst_w: usize, dst_h: usize) -> Self {
        Self {
            src_w,
            src_h,
            dst_w,
            dst_h,
            cols: taps(src_w, dst_w),
            rows: taps(src_h, dst_h),
        }
    }

    pub fn matches(&self, src_w: usize, src_h: usize, dst_w: usize, dst_h: usize) -> bool {
        (self.src_w, self.src_h, self.dst_w, self.dst_h) == (src_w, src_h, dst_w, dst_h)
    }

    /// Fills `dst` (`dst_w * dst_h`) from `src` (`src_w * src_h`). Rows run in parallel.
    pub fn blit(&self, src: &[u32], dst: &mut [u32]) {
        if self.src_w == 0 || self.src_h == 0 || self.dst_w == 0 {
            return;
        }
        debug_assert_eq!(src.len(), self.src_w * self.src_h);
        debug_assert_eq!(dst.len(), self.dst_w * self.dst_h);

        let sw = self.src_w;
        dst.par_chunks_mut(self.dst_w)
            .zip(self.rows.par_iter())
            .for_each(|(out, row)| {
                let upper = &src[row.near * sw..(row.near + 1) * sw];
                let lower = &src[row.far * sw..(row.far + 1) * sw];
                for (px, col) in out.iter_mut().zip(&self.cols) {
                    let top = mix(upper[col.near], upper[col.far], col.weight);
                    let bottom = mix(lower[col.near], lower[col.far], col.weight);
                    *px = mix(top, bottom, row.weight);
                }
            });
    }
}
