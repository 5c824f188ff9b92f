use crate::background::render_loop::{FrameStats, LoopState, TimeCursor, paint_frame};
use crate::background::surface_manager::{SurfaceManager, SurfaceState};
use crate::config::options::{AnimationConfig, WaveOptions};
use crate::field::noise::{NoiseField, entropy_seed};
use crate::foundation::error::WavyBgResult;
use crate::host::resize::{ListenerId, ResizeSubscription};
use crate::host::{FrameHandle, Host};
use crate::render::frame::FrameRGBA;
use crate::render::surface::DrawSurface;

/// The animated wave background.
///
/// Lifecycle:
///
/// - [`mount`](Self::mount) sizes the canvas, seeds the noise field, draws the first frame, asks
///   the host for the next one and subscribes to resize notifications.
/// - [`on_frame`](Self::on_frame) paints one tick and re-requests a frame.
/// - [`on_resize`](Self::on_resize) re-sizes the canvas and reapplies the blur.
/// - [`unmount`](Self::unmount) cancels the pending frame and releases the resize subscription.
///
/// Nothing here returns an error once constructed: a missing canvas or viewport degrades to "the
/// last drawn frame persists".
pub struct WavyBackground<C> {
    config: AnimationConfig,
    children: Option<FrameRGBA>,
    noise: NoiseField,
    surface: SurfaceManager<C>,
    state: LoopState,
    time: TimeCursor,
    resize: Option<ResizeSubscription>,
}

impl<C: DrawSurface> WavyBackground<C> {
    /// Validate `options` and build an unmounted background with no canvas attached.
    pub fn new(options: WaveOptions) -> WavyBgResult<Self> {
        let config = options.resolve()?;
        let noise = NoiseField::new(config.seed.unwrap_or(0));
        Ok(Self {
            surface: SurfaceManager::new(config.blur_radius_px),
            config,
            children: options.children,
            noise,
            state: LoopState::Stopped,
            time: TimeCursor::new(),
            resize: None,
        })
    }

    pub fn with_canvas(options: WaveOptions, canvas: C) -> WavyBgResult<Self> {
        let mut bg = Self::new(options)?;
        bg.attach_canvas(canvas);
        Ok(bg)
    }

    /// Attach a canvas, returning the previous one.
    pub fn attach_canvas(&mut self, canvas: C) -> Option<C> {
        self.surface.attach(canvas)
    }

    pub fn detach_canvas(&mut self) -> Option<C> {
        self.surface.detach()
    }

    pub fn canvas(&self) -> Option<&C> {
        self.surface.canvas()
    }

    pub fn canvas_mut(&mut self) -> Option<&mut C> {
        self.surface.canvas_mut()
    }

    pub fn config(&self) -> &AnimationConfig {
        &self.config
    }

    /// Content composited above the canvas, unaffected by blur.
    pub fn children(&self) -> Option<&FrameRGBA> {
        self.children.as_ref()
    }

    pub fn set_children(&mut self, children: Option<FrameRGBA>) {
        self.children = children;
    }

    pub fn surface_state(&self) -> SurfaceState {
        self.surface.state()
    }

    pub fn loop_state(&self) -> LoopState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, LoopState::Running(_))
    }

    pub fn is_mounted(&self) -> bool {
        self.state != LoopState::Stopped
    }

    pub fn time(&self) -> f64 {
        self.time.value()
    }

    pub fn noise_seed(&self) -> u32 {
        self.noise.seed()
    }

    pub fn resize_listener(&self) -> Option<ListenerId> {
        self.resize.as_ref().map(ResizeSubscription::id)
    }

    /// Mount onto `host`. Mounting an already-mounted background replaces its frame request and
    /// resize subscription instead of adding new ones.
    #[tracing::instrument(skip_all)]
    pub fn mount<H: Host>(&mut self, host: &mut H) {
        if let LoopState::Running(handle) = self.state {
            host.cancel_frame(handle);
        }
        self.resize = Some(host.subscribe_resize());

        let seed = self.config.seed.unwrap_or_else(entropy_seed);
        self.noise = NoiseField::new(seed);
        self.time = TimeCursor::new();

        self.state = LoopState::Stalled;
        if self
            .surface
            .initialize(host.viewport_size(), host.platform_id())
        {
            tracing::debug!(seed, "mounted");
            self.run_tick(host);
        } else {
            tracing::debug!(seed, "mounted without a drawable surface");
        }
    }

    /// Host frame callback. Stale handles, and callbacks after unmount, are ignored.
    pub fn on_frame<H: Host>(&mut self, handle: FrameHandle, host: &mut H) -> Option<FrameStats> {
        match self.state {
            LoopState::Running(current) if current == handle => self.run_tick(host),
            _ => None,
        }
    }

    /// Host resize notification for `listener`.
    ///
    /// Notifications addressed to another listener are ignored. A stalled loop restarts once the
    /// resize produced a drawable surface.
    #[tracing::instrument(skip(self, host))]
    pub fn on_resize<H: Host>(&mut self, listener: ListenerId, host: &mut H) -> bool {
        if self.resize_listener() != Some(listener) {
            return false;
        }
        let resized = self.surface.handle_resize(host.viewport_size());
        if resized && self.state == LoopState::Stalled {
            tracing::debug!("surface available again, restarting loop");
            self.run_tick(host);
        }
        resized
    }

    /// Cancel the pending frame and release the resize subscription.
    #[tracing::instrument(skip_all)]
    pub fn unmount<H: Host>(&mut self, host: &mut H) {
        if let LoopState::Running(handle) = self.state {
            host.cancel_frame(handle);
        }
        self.resize = None;
        if self.state != LoopState::Stopped {
            tracing::debug!(time = self.time.value(), "unmounted");
        }
        self.state = LoopState::Stopped;
    }

    /// Paint one tick and schedule the next; without a canvas, stall instead.
    fn run_tick<H: Host>(&mut self, host: &mut H) -> Option<FrameStats> {
        let size = self.surface.state().size();
        let Some(canvas) = self.surface.canvas_mut() else {
            tracing::debug!("no canvas attached, loop stalled");
            self.state = LoopState::Stalled;
            return None;
        };
        let stats = paint_frame(canvas, size, &self.config, &self.noise, &mut self.time);
        tracing::trace!(
            time = stats.time,
            strokes = stats.strokes,
            points = stats.points_per_stroke,
            "frame"
        );
        self.state = LoopState::Running(host.request_frame());
        Some(stats)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/background/component.rs"]
mod tests;
