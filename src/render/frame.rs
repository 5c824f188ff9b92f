use crate::foundation::core::{Rgba8Premul, ViewportSize};
use crate::foundation::error::{WavyBgError, WavyBgResult};

/// A rendered frame as RGBA8 pixels.
///
/// Frames produced by the CPU canvas are **premultiplied alpha**. The `premultiplied` flag makes
/// this explicit at API boundaries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether the `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    pub fn transparent(size: ViewportSize) -> Self {
        Self {
            width: size.width,
            height: size.height,
            data: vec![0; size.pixel_count().saturating_mul(4)],
            premultiplied: true,
        }
    }

    /// Wrap straight-alpha bytes (e.g. a decoded PNG) and premultiply them.
    pub fn from_straight_rgba8(width: u32, height: u32, mut data: Vec<u8>) -> WavyBgResult<Self> {
        let expected = ViewportSize::new(width, height).pixel_count().saturating_mul(4);
        if data.len() != expected {
            return Err(WavyBgError::render(format!(
                "expected {expected} rgba8 bytes for {width}x{height}, got {}",
                data.len()
            )));
        }
        for px in data.chunks_exact_mut(4) {
            let premul = Rgba8Premul::from_straight_rgba(px[0], px[1], px[2], px[3]);
            px.copy_from_slice(&premul.to_array());
        }
        Ok(Self {
            width,
            height,
            data,
            premultiplied: true,
        })
    }

    pub fn size(&self) -> ViewportSize {
        ViewportSize::new(self.width, self.height)
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        self.data
            .get(i..i + 4)
            .map(|px| [px[0], px[1], px[2], px[3]])
    }

    /// Straight-alpha copy of the pixels, suitable for PNG encoders.
    pub fn to_straight_rgba8(&self) -> Vec<u8> {
        if !self.premultiplied {
            return self.data.clone();
        }
        let mut out = self.data.clone();
        for px in out.chunks_exact_mut(4) {
            let a = u16::from(px[3]);
            if a == 0 {
                continue;
            }
            for c in &mut px[..3] {
                *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
            }
        }
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/frame.rs"]
mod tests;
