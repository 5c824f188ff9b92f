use crate::background::component::WavyBackground;
use crate::background::render_loop::FrameStats;
use crate::config::options::WaveOptions;
use crate::foundation::core::ViewportSize;
use crate::foundation::error::{WavyBgError, WavyBgResult};
use crate::host::headless::HeadlessHost;
use crate::render::cpu::CpuCanvas;
use crate::render::frame::FrameRGBA;
use crate::render::surface::DrawSurface;

/// Drives one [`WavyBackground`] on a [`HeadlessHost`].
///
/// The session is the single logical thread the background expects: frame callbacks and resize
/// notifications are dispatched one at a time, in the order the caller triggers them, so a resize
/// issued between two steps is observed by the next tick.
pub struct BackgroundSession<C> {
    host: HeadlessHost,
    background: WavyBackground<C>,
}

impl<C: DrawSurface> BackgroundSession<C> {
    pub fn new(host: HeadlessHost, background: WavyBackground<C>) -> Self {
        Self { host, background }
    }

    pub fn host(&self) -> &HeadlessHost {
        &self.host
    }

    pub fn background(&self) -> &WavyBackground<C> {
        &self.background
    }

    pub fn background_mut(&mut self) -> &mut WavyBackground<C> {
        &mut self.background
    }

    #[tracing::instrument(skip_all)]
    pub fn mount(&mut self) {
        self.background.mount(&mut self.host);
    }

    #[tracing::instrument(skip_all)]
    pub fn unmount(&mut self) {
        self.background.unmount(&mut self.host);
    }

    /// Fire every pending frame request once. Frames requested during this step wait for the
    /// next one.
    pub fn step(&mut self) -> Vec<FrameStats> {
        self.host
            .take_pending_frames()
            .into_iter()
            .filter_map(|handle| self.background.on_frame(handle, &mut self.host))
            .collect()
    }

    /// Run `steps` frame steps and return the stats of the last painted frame.
    #[tracing::instrument(skip(self))]
    pub fn run(&mut self, steps: u64) -> Option<FrameStats> {
        let mut last = None;
        for _ in 0..steps {
            if let Some(stats) = self.step().pop() {
                last = Some(stats);
            }
        }
        last
    }

    /// Change the host viewport and deliver the resize notification. Returns how many listeners
    /// re-sized their surface.
    #[tracing::instrument(skip(self))]
    pub fn resize(&mut self, viewport: Option<ViewportSize>) -> usize {
        self.host
            .set_viewport(viewport)
            .into_iter()
            .filter(|&id| self.background.on_resize(id, &mut self.host))
            .count()
    }
}

impl BackgroundSession<CpuCanvas> {
    /// A session with a fresh [`CpuCanvas`], not yet mounted.
    pub fn cpu(options: WaveOptions, host: HeadlessHost) -> WavyBgResult<Self> {
        let background = WavyBackground::with_canvas(options, CpuCanvas::new())?;
        Ok(Self::new(host, background))
    }

    /// The frame a viewer would see: canvas, style-level blur, then the children overlay.
    pub fn present(&self) -> WavyBgResult<FrameRGBA> {
        let canvas = self
            .background
            .canvas()
            .ok_or_else(|| WavyBgError::render("no canvas attached"))?;
        canvas.present(self.background.children())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/background_session.rs"]
mod tests;
