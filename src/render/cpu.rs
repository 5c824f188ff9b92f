use crate::foundation::core::{BezPath, Rect, Rgba8, ViewportSize};
use crate::foundation::error::{WavyBgError, WavyBgResult};
use crate::render::blur::{BlurKernel, blur_in_place};
use crate::render::composite::over_in_place;
use crate::render::frame::FrameRGBA;
use crate::render::surface::{Blur, DrawSurface, sanitize_alpha};
use kurbo::Shape;

/// CPU canvas powered by `vello_cpu` for path rasterization.
///
/// Every fill or stroke is rasterized into a transparent layer, blurred when a canvas filter is
/// set, then composited source-over onto the target. Pixels are premultiplied RGBA8. A zero-sized
/// canvas has no buffer and ignores draw calls.
pub struct CpuCanvas {
    size: ViewportSize,
    target: Option<vello_cpu::Pixmap>,
    layer: Option<vello_cpu::Pixmap>,
    ctx: Option<vello_cpu::RenderContext>,

    filter: Option<Blur>,
    style_filter: Option<Blur>,
    global_alpha: f64,

    kernel_cache: Option<(u64, Option<BlurKernel>)>,
    blur_scratch: Vec<u8>,
}

impl Default for CpuCanvas {
    fn default() -> Self {
        Self {
            size: ViewportSize::default(),
            target: None,
            layer: None,
            ctx: None,
            filter: None,
            style_filter: None,
            global_alpha: 1.0,
            kernel_cache: None,
            blur_scratch: Vec::new(),
        }
    }
}

impl CpuCanvas {
    /// An unsized canvas; the background sizes it to the viewport on mount.
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw canvas pixels, without the style filter.
    pub fn snapshot(&self) -> FrameRGBA {
        match &self.target {
            Some(pm) => FrameRGBA {
                width: self.size.width,
                height: self.size.height,
                data: pm.data_as_u8_slice().to_vec(),
                premultiplied: true,
            },
            None => FrameRGBA::transparent(self.size),
        }
    }

    /// What a viewer sees: canvas pixels with the style filter applied, then `overlay` composited
    /// on top unblurred.
    pub fn present(&self, overlay: Option<&FrameRGBA>) -> WavyBgResult<FrameRGBA> {
        let mut frame = self.snapshot();
        if let Some(kernel) = self
            .style_filter
            .and_then(|b| BlurKernel::for_css_radius(b.radius_px))
        {
            let mut scratch = Vec::new();
            blur_in_place(
                &mut frame.data,
                &mut scratch,
                frame.width,
                frame.height,
                &kernel,
            );
        }
        if let Some(overlay) = overlay {
            if overlay.size() != frame.size() {
                return Err(WavyBgError::render(format!(
                    "overlay is {}x{} but canvas is {}x{}",
                    overlay.width, overlay.height, frame.width, frame.height
                )));
            }
            over_in_place(&mut frame.data, &overlay.data, 1.0)?;
        }
        Ok(frame)
    }

    fn kernel(&mut self) -> Option<BlurKernel> {
        let radius = self.filter?.radius_px;
        let key = radius.to_bits();
        match &self.kernel_cache {
            Some((k, kernel)) if *k == key => kernel.clone(),
            _ => {
                let kernel = BlurKernel::for_css_radius(radius);
                self.kernel_cache = Some((key, kernel.clone()));
                kernel
            }
        }
    }

    /// Rasterize one draw call and composite it onto the target.
    ///
    /// `rows` bounds (in target pixels) where the call can leave ink before blurring; only that
    /// band, padded by the kernel radius, is blurred and composited.
    fn draw_layer(
        &mut self,
        rows: (f64, f64),
        blur: bool,
        f: impl FnOnce(&mut vello_cpu::RenderContext),
    ) {
        let Some(mut target) = self.target.take() else {
            return;
        };
        let (w, h) = (target.width(), target.height());

        let mut layer = match self.layer.take() {
            Some(pm) if pm.width() == w && pm.height() == h => pm,
            _ => vello_cpu::Pixmap::new(w, h),
        };
        layer.data_as_u8_slice_mut().fill(0);

        let mut ctx = match self.ctx.take() {
            Some(ctx) if ctx.width() == w && ctx.height() == h => ctx,
            _ => vello_cpu::RenderContext::new(w, h),
        };
        ctx.reset();
        f(&mut ctx);
        ctx.flush();
        ctx.render_to_pixmap(&mut layer);
        self.ctx = Some(ctx);

        let kernel = if blur { self.kernel() } else { None };
        let pad = kernel.as_ref().map_or(0.0, |k| k.radius() as f64);
        let y0 = (rows.0 - pad).floor().clamp(0.0, f64::from(h)) as usize;
        let y1 = (rows.1 + pad).ceil().clamp(0.0, f64::from(h)) as usize;
        if y0 < y1 {
            let row_len = usize::from(w) * 4;
            let band = y0 * row_len..y1 * row_len;
            if let Some(kernel) = &kernel {
                blur_in_place(
                    &mut layer.data_as_u8_slice_mut()[band.clone()],
                    &mut self.blur_scratch,
                    u32::from(w),
                    (y1 - y0) as u32,
                    kernel,
                );
            }
            if let Err(e) = over_in_place(
                &mut target.data_as_u8_slice_mut()[band.clone()],
                &layer.data_as_u8_slice()[band],
                1.0,
            ) {
                tracing::warn!(error = %e, "dropping draw call");
            }
        }

        self.layer = Some(layer);
        self.target = Some(target);
    }

    fn paint(&self, color: Rgba8) -> vello_cpu::peniko::Color {
        let c = color.with_alpha_mul(self.global_alpha);
        vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
    }
}

impl DrawSurface for CpuCanvas {
    fn size(&self) -> ViewportSize {
        self.size
    }

    fn resize(&mut self, size: ViewportSize) {
        let clamp = |v: u32| -> u16 {
            u16::try_from(v).unwrap_or_else(|_| {
                tracing::warn!(requested = v, max = u16::MAX, "canvas dimension clamped");
                u16::MAX
            })
        };
        let (w, h) = (clamp(size.width), clamp(size.height));
        self.size = ViewportSize::new(u32::from(w), u32::from(h));
        self.target = (!self.size.is_empty()).then(|| vello_cpu::Pixmap::new(w, h));
        self.layer = None;
        self.filter = None;
        self.global_alpha = 1.0;
    }

    fn filter(&self) -> Option<Blur> {
        self.filter
    }

    fn set_filter(&mut self, filter: Option<Blur>) {
        self.filter = filter;
    }

    fn style_filter(&self) -> Option<Blur> {
        self.style_filter
    }

    fn set_style_filter(&mut self, filter: Option<Blur>) {
        self.style_filter = filter;
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
        let paint = self.paint(color);
        // A uniform fill over the whole buffer is unchanged by an edge-clamped blur.
        let covers = covers_bounds(rect, self.size.bounds());
        let rect = vello_cpu::kurbo::Rect::new(rect.x0, rect.y0, rect.x1, rect.y1);
        self.draw_layer((rect.y0.min(rect.y1), rect.y0.max(rect.y1)), !covers, |ctx| {
            ctx.set_paint(paint);
            ctx.fill_rect(&rect);
        });
    }

    fn stroke_path(&mut self, path: &BezPath, width: f64, color: Rgba8) {
        if !width.is_finite() || width <= 0.0 || path.elements().is_empty() {
            return;
        }
        let paint = self.paint(color);
        let bbox = path.bounding_box();
        // Miter joins can reach `miter_limit * width / 2` past the path.
        let reach = width * 0.5 * MITER_LIMIT;
        let cpu_path = bezpath_to_cpu(path);
        let stroke = vello_cpu::kurbo::Stroke::new(width)
            .with_join(vello_cpu::kurbo::Join::Miter)
            .with_miter_limit(MITER_LIMIT)
            .with_caps(vello_cpu::kurbo::Cap::Butt);
        self.draw_layer((bbox.y0 - reach, bbox.y1 + reach), true, |ctx| {
            ctx.set_paint(paint);
            ctx.set_stroke(stroke);
            ctx.stroke_path(&cpu_path);
        });
    }
}

fn covers_bounds(rect: Rect, bounds: Rect) -> bool {
    let r = rect.abs();
    r.x0 <= bounds.x0 && r.y0 <= bounds.y0 && r.x1 >= bounds.x1 && r.y1 >= bounds.y1
}

/// Canvas 2D default `miterLimit`.
const MITER_LIMIT: f64 = 10.0;

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::LineTo(p) => out.line_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::QuadTo(p1, p2) => out.quad_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
            ),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
                vello_cpu::kurbo::Point::new(p3.x, p3.y),
            ),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
