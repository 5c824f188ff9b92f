use crate::foundation::core::{BezPath, Rect, Rgba8, ViewportSize};

/// A gaussian blur filter, `radius_px` being the CSS `blur()` length.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Blur {
    pub radius_px: f64,
}

impl Blur {
    pub fn new(radius_px: f64) -> Self {
        Self { radius_px }
    }
}

/// The 2D drawing surface a background paints into.
///
/// Models the subset of an HTML canvas the renderer needs. Two filter slots exist: the
/// canvas-level `filter`, applied to every draw call as it lands, and the element-level
/// `style_filter`, applied to the whole surface when it is presented.
pub trait DrawSurface {
    /// Current pixel buffer size.
    fn size(&self) -> ViewportSize;

    /// Reallocate the pixel buffer.
    ///
    /// Like assigning a canvas's width/height, this clears the pixels and resets drawing state:
    /// the canvas filter is removed and global alpha returns to `1.0`. The style filter belongs
    /// to the element and survives.
    fn resize(&mut self, size: ViewportSize);

    fn filter(&self) -> Option<Blur>;

    fn set_filter(&mut self, filter: Option<Blur>);

    fn style_filter(&self) -> Option<Blur>;

    fn set_style_filter(&mut self, filter: Option<Blur>);

    fn global_alpha(&self) -> f64;

    /// Alpha multiplier for subsequent fills and strokes, clamped to `0..=1`. Non-finite values
    /// are ignored.
    fn set_global_alpha(&mut self, alpha: f64);

    fn fill_rect(&mut self, rect: Rect, color: Rgba8);

    /// Stroke `path` with butt caps and miter joins.
    fn stroke_path(&mut self, path: &BezPath, width: f64, color: Rgba8);
}

pub(crate) fn sanitize_alpha(alpha: f64) -> Option<f64> {
    alpha.is_finite().then(|| alpha.clamp(0.0, 1.0))
}
