use crate::config::options::{AnimationConfig, SpeedTier};
use crate::field::noise::NoiseField;
use crate::field::sampler::{WaveSampler, columns};
use crate::foundation::core::ViewportSize;
use crate::host::FrameHandle;
use crate::render::surface::DrawSurface;

/// Animation time. Advances by a fixed increment per tick and only moves forward.
///
/// The value is never wrapped; see DESIGN.md for the long-running precision trade-off.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct TimeCursor(f64);

impl TimeCursor {
    pub fn new() -> Self {
        Self(0.0)
    }

    pub fn value(self) -> f64 {
        self.0
    }

    pub fn advance(&mut self, speed: SpeedTier) -> f64 {
        self.0 += speed.increment();
        self.0
    }
}

/// Render loop lifecycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LoopState {
    /// Not mounted, or unmounted.
    #[default]
    Stopped,
    /// Mounted with one pending frame request.
    Running(FrameHandle),
    /// Mounted, but the last tick found no canvas; waits for a resize or remount.
    Stalled,
}

/// Summary of one painted frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameStats {
    /// Fill calls issued (the translucent background pass).
    pub fills: usize,
    pub strokes: usize,
    /// Vertices in each wave path.
    pub points_per_stroke: usize,
    /// Time cursor after this frame's advance.
    pub time: f64,
}

/// One frame tick: translucent fill, time advance, then one stroke per wave lane.
///
/// Global alpha is set once for the fill and left in place for the strokes.
pub(crate) fn paint_frame<C: DrawSurface>(
    canvas: &mut C,
    size: ViewportSize,
    cfg: &AnimationConfig,
    noise: &NoiseField,
    time: &mut TimeCursor,
) -> FrameStats {
    canvas.set_global_alpha(cfg.background_opacity);
    canvas.fill_rect(size.bounds(), cfg.background_fill.to_rgba8());

    let t = time.advance(cfg.speed);
    let sampler = WaveSampler::new(noise, t);
    for lane in 0..cfg.wave_count {
        let path = sampler.lane_path(lane, size);
        canvas.stroke_path(&path, cfg.wave_width, cfg.lane_color(lane).to_rgba8());
    }

    FrameStats {
        fills: 1,
        strokes: cfg.wave_count,
        points_per_stroke: columns(size.width).count(),
        time: t,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/background/render_loop.rs"]
mod tests;
