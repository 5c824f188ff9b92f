use crate::foundation::error::{WavyBgError, WavyBgResult};
use rayon::prelude::*;

/// Gaussian kernel in Q16 fixed point; weights sum to exactly `1 << 16`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlurKernel {
    weights: Vec<u32>,
}

impl BlurKernel {
    /// Kernel equivalent to CSS `blur(<radius_px>px)`, where the length is the standard deviation.
    ///
    /// Returns `None` when the blur would not change any pixel.
    pub fn for_css_radius(radius_px: f64) -> Option<Self> {
        if !radius_px.is_finite() || radius_px < 0.5 {
            return None;
        }
        let taps = (radius_px * 3.0).ceil() as u32;
        gaussian_kernel_q16(taps, radius_px as f32).ok()
    }

    /// Number of taps on each side of the center.
    pub fn radius(&self) -> usize {
        self.weights.len() / 2
    }
}

/// Separable blur of `buf` (premultiplied RGBA8, `width * height * 4` bytes), reusing `scratch`.
///
/// Edges clamp, so a uniform image is left unchanged.
pub(crate) fn blur_in_place(
    buf: &mut [u8],
    scratch: &mut Vec<u8>,
    width: u32,
    height: u32,
    kernel: &BlurKernel,
) {
    if width == 0 || height == 0 || kernel.weights.len() <= 1 {
        return;
    }
    scratch.resize(buf.len(), 0);
    horizontal_pass(buf, scratch, width, &kernel.weights);
    vertical_pass(scratch, buf, width, height, &kernel.weights);
}

fn gaussian_kernel_q16(radius: u32, sigma: f32) -> WavyBgResult<BlurKernel> {
    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(WavyBgError::validation("blur sigma must be > 0"));
    }

    let r = radius as i32;
    let mut weights_f = Vec::<f64>::with_capacity((2 * r + 1) as usize);
    let mut sum = 0.0f64;
    let sigma = sigma as f64;
    let denom = 2.0 * sigma * sigma;
    for i in -r..=r {
        let x = i as f64;
        let w = (-x * x / denom).exp();
        weights_f.push(w);
        sum += w;
    }
    if sum <= 0.0 {
        return Err(WavyBgError::render("gaussian kernel sum is zero"));
    }

    let mut weights = Vec::<u32>::with_capacity(weights_f.len());
    let mut acc: i64 = 0;
    for &wf in &weights_f {
        let q = ((wf / sum) * 65536.0).round() as i64;
        let q = q.clamp(0, 65536);
        weights.push(q as u32);
        acc += q;
    }
    let delta = 65536 - acc;
    if delta != 0 {
        let mid = weights.len() / 2;
        let new_mid = (i64::from(weights[mid]) + delta).clamp(0, 65536);
        weights[mid] = new_mid as u32;
    }

    Ok(BlurKernel { weights })
}

fn horizontal_pass(src: &[u8], dst: &mut [u8], width: u32, k: &[u32]) {
    let radius = (k.len() / 2) as i32;
    let w = width as i32;
    let row_len = width as usize * 4;
    dst.par_chunks_mut(row_len)
        .zip(src.par_chunks(row_len))
        .for_each(|(dst_row, src_row)| {
            for x in 0..w {
                let mut acc = [0u64; 4];
                for (ki, &kw) in k.iter().enumerate() {
                    let sx = (x + ki as i32 - radius).clamp(0, w - 1);
                    let idx = sx as usize * 4;
                    for c in 0..4 {
                        acc[c] += u64::from(kw) * u64::from(src_row[idx + c]);
                    }
                }
                let out_idx = x as usize * 4;
                for c in 0..4 {
                    dst_row[out_idx + c] = q16_to_u8(acc[c]);
                }
            }
        });
}

fn vertical_pass(src: &[u8], dst: &mut [u8], width: u32, height: u32, k: &[u32]) {
    let radius = (k.len() / 2) as i32;
    let h = height as i32;
    let row_len = width as usize * 4;
    dst.par_chunks_mut(row_len)
        .enumerate()
        .for_each(|(y, dst_row)| {
            let y = y as i32;
            for (i, out) in dst_row.iter_mut().enumerate() {
                let mut acc = 0u64;
                for (ki, &kw) in k.iter().enumerate() {
                    let sy = (y + ki as i32 - radius).clamp(0, h - 1);
                    acc += u64::from(kw) * u64::from(src[sy as usize * row_len + i]);
                }
                *out = q16_to_u8(acc);
            }
        });
}

fn q16_to_u8(acc: u64) -> u8 {
    let v = (acc + 32768) >> 16;
    (v.min(255)) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/render/blur.rs"]
mod tests;
