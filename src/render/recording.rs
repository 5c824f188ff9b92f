use crate::foundation::core::{BezPath, Point, Rect, Rgba8, ViewportSize};
use crate::render::surface::{Blur, DrawSurface, sanitize_alpha};
use kurbo::PathEl;

/// One call observed by a [`RecordingSurface`].
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCall {
    Resize(ViewportSize),
    SetFilter(Option<Blur>),
    SetStyleFilter(Option<Blur>),
    FillRect {
        rect: Rect,
        color: Rgba8,
        alpha: f64,
        filter: Option<Blur>,
    },
    Stroke {
        points: Vec<Point>,
        width: f64,
        color: Rgba8,
        alpha: f64,
        filter: Option<Blur>,
    },
}

/// Surface that records draw calls instead of rasterizing, for tests and debugging.
#[derive(Clone, Debug)]
pub struct RecordingSurface {
    size: ViewportSize,
    filter: Option<Blur>,
    style_filter: Option<Blur>,
    global_alpha: f64,
    calls: Vec<DrawCall>,
}

impl Default for RecordingSurface {
    fn default() -> Self {
        Self {
            size: ViewportSize::default(),
            filter: None,
            style_filter: None,
            global_alpha: 1.0,
            calls: Vec::new(),
        }
    }
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call in the order it was made.
    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    pub fn resize_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, DrawCall::Resize(_)))
            .count()
    }

    pub fn fills(&self) -> impl Iterator<Item = &DrawCall> {
        self.calls
            .iter()
            .filter(|c| matches!(c, DrawCall::FillRect { .. }))
    }

    pub fn strokes(&self) -> impl Iterator<Item = &DrawCall> {
        self.calls
            .iter()
            .filter(|c| matches!(c, DrawCall::Stroke { .. }))
    }

    /// Number of fill and stroke calls.
    pub fn draw_count(&self) -> usize {
        self.fills().count() + self.strokes().count()
    }
}

impl DrawSurface for RecordingSurface {
    fn size(&self) -> ViewportSize {
        self.size
    }

    fn resize(&mut self, size: ViewportSize) {
        self.size = size;
        self.filter = None;
        self.global_alpha = 1.0;
        self.calls.push(DrawCall::Resize(size));
    }

    fn filter(&self) -> Option<Blur> {
        self.filter
    }

    fn set_filter(&mut self, filter: Option<Blur>) {
        self.filter = filter;
        self.calls.push(DrawCall::SetFilter(filter));
    }

    fn style_filter(&self) -> Option<Blur> {
        self.style_filter
    }

    fn set_style_filter(&mut self, filter: Option<Blur>) {
        self.style_filter = filter;
        self.calls.push(DrawCall::SetStyleFilter(filter));
    }

    fn global_alpha(&self) -> f64 {
        self.global_alpha
    }

    fn set_global_alpha(&mut self, alpha: f64) {
        if let Some(a) = sanitize_alpha(alpha) {
            self.global_alpha = a;
        }
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgba8) {
        self.calls.push(DrawCall::FillRect {
            rect,
            color,
            alpha: self.global_alpha,
            filter: self.filter,
        });
    }

    fn stroke_path(&mut self, path: &BezPath, width: f64, color: Rgba8) {
        let points = path
            .elements()
            .iter()
            .filter_map(|el| match *el {
                PathEl::MoveTo(p) | PathEl::LineTo(p) => Some(p),
                PathEl::QuadTo(_, p) | PathEl::CurveTo(_, _, p) => Some(p),
                PathEl::ClosePath => None,
            })
            .collect();
        self.calls.push(DrawCall::Stroke {
            points,
            width,
            color,
            alpha: self.global_alpha,
            filter: self.filter,
        });
    }
}
