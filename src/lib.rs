//! wavy-bg renders an animated wave background.
//!
//! Five translucent strokes scroll through a seeded 3D simplex noise field, painted each frame
//! over a translucent fill so older frames fade out as trails. The canvas is blurred either with a
//! canvas-level filter or, on engines where that is unreliable, with an element-level fallback.
//!
//! The embedding environment is abstracted behind two traits:
//!
//! - [`Host`]: viewport size, frame pacing, platform identifier, resize notifications
//! - [`DrawSurface`]: the 2D canvas the loop paints on
//!
//! [`HeadlessHost`] with [`CpuCanvas`] (or [`RecordingSurface`]) renders deterministically
//! without a display; [`BackgroundSession`] drives the pair frame by frame.
#![forbid(unsafe_code)]

mod background;
mod config;
mod field;
mod foundation;
mod host;
mod render;
mod session;

pub use crate::foundation::color::Color;
pub use crate::foundation::core::{BezPath, Point, Rect, Rgba8, ViewportSize};
pub use crate::foundation::error::{WavyBgError, WavyBgResult};

pub use crate::config::options::{
    AnimationConfig, DEFAULT_BLUR_PX, DEFAULT_PALETTE, DEFAULT_WAVE_OPACITY, DEFAULT_WAVE_WIDTH,
    SpeedTier, WAVE_COUNT, WaveOptions, default_palette,
};
pub use crate::field::noise::{NoiseField, entropy_seed};
pub use crate::field::sampler::{
    AMPLITUDE_PX, LANE_SPACING, WaveSampler, X_SCALE, X_STEP_PX, columns,
};

pub use crate::host::headless::HeadlessHost;
pub use crate::host::platform::EngineProfile;
pub use crate::host::resize::{ListenerId, ResizeRegistry, ResizeSubscription};
pub use crate::host::{FrameHandle, Host};

pub use crate::render::blur::BlurKernel;
pub use crate::render::composite::{PremulRgba8, over, over_in_place};
pub use crate::render::cpu::CpuCanvas;
pub use crate::render::frame::FrameRGBA;
pub use crate::render::recording::{DrawCall, RecordingSurface};
pub use crate::render::surface::{Blur, DrawSurface};

pub use crate::background::component::WavyBackground;
pub use crate::background::render_loop::{FrameStats, LoopState, TimeCursor};
pub use crate::background::surface_manager::{SurfaceManager, SurfaceState};
pub use crate::session::background_session::BackgroundSession;
