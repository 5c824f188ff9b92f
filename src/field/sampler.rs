use crate::field::noise::NoiseField;
use crate::foundation::core::{BezPath, Point, ViewportSize};

/// Horizontal distance between consecutive path points, in pixels.
pub const X_STEP_PX: usize = 5;
/// Pixels per noise unit along x.
pub const X_SCALE: f64 = 800.0;
/// Noise-space spacing between wave lanes.
pub const LANE_SPACING: f64 = 0.3;
/// Peak vertical displacement, in pixels.
pub const AMPLITUDE_PX: f64 = 100.0;

/// Maps `(lane, x)` at a fixed time cursor to a point on a wave.
///
/// Stateless apart from the borrowed noise field and the time value it was created with.
#[derive(Clone, Copy, Debug)]
pub struct WaveSampler<'a> {
    noise: &'a NoiseField,
    time: f64,
}

impl<'a> WaveSampler<'a> {
    pub fn new(noise: &'a NoiseField, time: f64) -> Self {
        Self { noise, time }
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    /// Offset of lane `i` along the noise field's second dimension.
    pub fn lane_offset(lane: usize) -> f64 {
        LANE_SPACING * lane as f64
    }

    /// Noise-space coordinate sampled for lane `lane` at pixel column `x`.
    pub fn coordinate(&self, lane: usize, x: f64) -> [f64; 3] {
        [x / X_SCALE, Self::lane_offset(lane), self.time]
    }

    /// Vertical displacement in pixels, in `[-AMPLITUDE_PX, AMPLITUDE_PX]`.
    pub fn displacement(&self, lane: usize, x: f64) -> f64 {
        let [nx, ny, nz] = self.coordinate(lane, x);
        self.noise.sample(nx, ny, nz) * AMPLITUDE_PX
    }

    /// Path point for `lane` at column `x`, centered on the middle of a surface `height` tall.
    pub fn point(&self, lane: usize, x: f64, height: u32) -> Point {
        Point::new(x, self.displacement(lane, x) + f64::from(height) * 0.5)
    }

    /// Polyline through every sampled column of `size`.
    pub fn lane_path(&self, lane: usize, size: ViewportSize) -> BezPath {
        let mut path = BezPath::new();
        for (i, x) in columns(size.width).enumerate() {
            let p = self.point(lane, f64::from(x), size.height);
            if i == 0 {
                path.move_to(p);
            } else {
                path.line_to(p);
            }
        }
        path
    }
}

/// Sampled columns `0, 5, 10, …` strictly below `width`.
pub fn columns(width: u32) -> impl Iterator<Item = u32> {
    (0..width).step_by(X_STEP_PX)
}

#[cfg(test)]
#[path = "../../tests/unit/field/sampler.rs"]
mod tests;
