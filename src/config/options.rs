use crate::foundation::color::Color;
use crate::foundation::error::{WavyBgError, WavyBgResult};
use crate::render::frame::FrameRGBA;
use serde::Deserialize;

/// Number of wave lanes drawn every frame.
pub const WAVE_COUNT: usize = 5;

pub const DEFAULT_WAVE_WIDTH: f64 = 50.0;
pub const DEFAULT_BLUR_PX: f64 = 10.0;
pub const DEFAULT_WAVE_OPACITY: f64 = 0.5;

/// Palette used when no colors are configured.
pub const DEFAULT_PALETTE: [&str; 5] = ["#38bdf8", "#818cf8", "#c084fc", "#e879f9", "#22d3ee"];

/// Time-advance rate of the animation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpeedTier {
    Slow,
    #[default]
    Fast,
}

impl SpeedTier {
    /// Fixed time-cursor increment applied once per frame tick.
    pub fn increment(self) -> f64 {
        match self {
            Self::Slow => 0.001,
            Self::Fast => 0.002,
        }
    }
}

/// Construction options, every field optional.
///
/// Mirrors the public contract of the background component. `wave_width` and `wave_opacity`
/// treat `0` as "unset" and fall back to their defaults.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WaveOptions {
    pub colors: Option<Vec<Color>>,
    #[serde(alias = "waveWidth")]
    pub wave_width: Option<f64>,
    #[serde(alias = "backgroundFill")]
    pub background_fill: Option<Color>,
    pub blur: Option<f64>,
    pub speed: Option<SpeedTier>,
    #[serde(alias = "waveOpacity")]
    pub wave_opacity: Option<f64>,
    pub seed: Option<u32>,
    /// Content composited above the canvas at presentation, unaffected by blur.
    #[serde(skip)]
    pub children: Option<FrameRGBA>,
}

/// Immutable per-mount configuration, produced by [`WaveOptions::resolve`].
#[derive(Clone, Debug, PartialEq)]
pub struct AnimationConfig {
    pub wave_count: usize,
    pub wave_width: f64,
    pub palette: Vec<Color>,
    pub speed: SpeedTier,
    pub blur_radius_px: f64,
    pub background_fill: Color,
    pub background_opacity: f64,
    pub seed: Option<u32>,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            wave_count: WAVE_COUNT,
            wave_width: DEFAULT_WAVE_WIDTH,
            palette: default_palette(),
            speed: SpeedTier::default(),
            blur_radius_px: DEFAULT_BLUR_PX,
            background_fill: Color::BLACK,
            background_opacity: DEFAULT_WAVE_OPACITY,
            seed: None,
        }
    }
}

impl AnimationConfig {
    /// Palette color for wave lane `i`, cycling through the palette.
    pub fn lane_color(&self, i: usize) -> Color {
        self.palette[i % self.palette.len()]
    }
}

impl WaveOptions {
    pub fn from_json_str(s: &str) -> WavyBgResult<Self> {
        serde_json::from_str(s)
            .map_err(|e| WavyBgError::validation(format!("invalid wave options JSON: {e}")))
    }

    /// Apply defaults and validate.
    pub fn resolve(&self) -> WavyBgResult<AnimationConfig> {
        let palette = match &self.colors {
            Some(c) if c.is_empty() => {
                return Err(WavyBgError::validation("colors must not be empty"));
            }
            Some(c) => c.clone(),
            None => default_palette(),
        };

        let wave_width = non_zero_or(self.wave_width, DEFAULT_WAVE_WIDTH);
        if !wave_width.is_finite() || wave_width < 0.0 {
            return Err(WavyBgError::validation(
                "wave_width must be finite and >= 0",
            ));
        }

        let background_opacity = non_zero_or(self.wave_opacity, DEFAULT_WAVE_OPACITY);
        if !(0.0..=1.0).contains(&background_opacity) {
            return Err(WavyBgError::validation("wave_opacity must be in [0, 1]"));
        }

        let blur_radius_px = self.blur.unwrap_or(DEFAULT_BLUR_PX);
        if !blur_radius_px.is_finite() || blur_radius_px < 0.0 {
            return Err(WavyBgError::validation("blur must be finite and >= 0"));
        }

        Ok(AnimationConfig {
            wave_count: WAVE_COUNT,
            wave_width,
            palette,
            speed: self.speed.unwrap_or_default(),
            blur_radius_px,
            background_fill: self.background_fill.unwrap_or(Color::BLACK),
            background_opacity,
            seed: self.seed,
        })
    }
}

fn non_zero_or(v: Option<f64>, default: f64) -> f64 {
    match v {
        Some(v) if v != 0.0 => v,
        _ => default,
    }
}

pub fn default_palette() -> Vec<Color> {
    DEFAULT_PALETTE
        .iter()
        .filter_map(|s| s.parse().ok())
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/config/options.rs"]
mod tests;
