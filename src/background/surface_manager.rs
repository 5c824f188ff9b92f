use crate::foundation::core::ViewportSize;
use crate::host::platform::EngineProfile;
use crate::render::surface::{Blur, DrawSurface};

/// Canvas dimensions and filter state as last applied by the [`SurfaceManager`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SurfaceState {
    pub width_px: u32,
    pub height_px: u32,
    /// Whether the canvas-level blur filter is applied (false on the degraded engine, where the
    /// blur lives on the style filter instead).
    pub blur_active: bool,
}

impl SurfaceState {
    pub fn size(&self) -> ViewportSize {
        ViewportSize::new(self.width_px, self.height_px)
    }
}

/// Owns the canvas: sizing, resize adaptation, blur filter and the degraded-engine fallback.
pub struct SurfaceManager<C> {
    canvas: Option<C>,
    state: SurfaceState,
    blur: Blur,
    engine: EngineProfile,
}

impl<C: DrawSurface> SurfaceManager<C> {
    pub fn new(blur_radius_px: f64) -> Self {
        Self {
            canvas: None,
            state: SurfaceState::default(),
            blur: Blur::new(blur_radius_px),
            engine: EngineProfile::default(),
        }
    }

    /// Attach a canvas, returning the one it replaces.
    pub fn attach(&mut self, canvas: C) -> Option<C> {
        self.canvas.replace(canvas)
    }

    pub fn detach(&mut self) -> Option<C> {
        self.canvas.take()
    }

    pub fn canvas(&self) -> Option<&C> {
        self.canvas.as_ref()
    }

    pub fn canvas_mut(&mut self) -> Option<&mut C> {
        self.canvas.as_mut()
    }

    pub fn has_canvas(&self) -> bool {
        self.canvas.is_some()
    }

    pub fn state(&self) -> SurfaceState {
        self.state
    }

    pub fn engine(&self) -> EngineProfile {
        self.engine
    }

    /// Mount-time setup: detect the engine, size the canvas to the viewport and apply the blur.
    ///
    /// Returns `false` (leaving the canvas untouched) when there is no canvas or no viewport.
    pub fn initialize(&mut self, viewport: Option<ViewportSize>, platform_id: &str) -> bool {
        self.engine = EngineProfile::detect(platform_id);
        if self.engine.is_degraded() {
            tracing::debug!("degraded blur engine detected, using style-level blur");
        }
        self.apply_viewport(viewport)
    }

    /// Resize adaptation. Reallocating the buffer drops the canvas filter, so it is reapplied.
    pub fn handle_resize(&mut self, viewport: Option<ViewportSize>) -> bool {
        self.apply_viewport(viewport)
    }

    fn apply_viewport(&mut self, viewport: Option<ViewportSize>) -> bool {
        let Some(size) = viewport else {
            tracing::debug!("no viewport to size against, skipping");
            return false;
        };
        let Some(canvas) = self.canvas.as_mut() else {
            tracing::debug!("no canvas attached, skipping");
            return false;
        };

        canvas.resize(size);
        let applied = canvas.size();
        self.state.width_px = applied.width;
        self.state.height_px = applied.height;

        if self.engine.is_degraded() {
            canvas.set_filter(None);
            canvas.set_style_filter(Some(self.blur));
            self.state.blur_active = false;
        } else {
            canvas.set_filter(Some(self.blur));
            canvas.set_style_filter(None);
            self.state.blur_active = true;
        }
        tracing::debug!(
            width = applied.width,
            height = applied.height,
            blur_active = self.state.blur_active,
            "surface sized"
        );
        true
    }
}

#[cfg(test)]
#[path = "../../tests/unit/background/surface_manager.rs"]
mod tests;
