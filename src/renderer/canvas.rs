//! Canvas 2D implementation of [`Surface`]

use glam::Vec2;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::{Color, Surface};
use crate::sim::geom::Rect;

pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
    size: (f32, f32),
    offset: Vec2,
}

impl CanvasSurface {
    pub fn new(canvas: &HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self {
            ctx,
            size: (canvas.width() as f32, canvas.height() as f32),
            offset: Vec2::ZERO,
        })
    }

    fn arc_path(&self, center: Vec2, radius: f32, start: f32, end: f32) {
        let c = center - self.offset;
        // Only fails for a negative radius
        let _ = self
            .ctx
            .arc(c.x as f64, c.y as f64, radius.max(0.0) as f64, start as f64, end as f64);
    }
}

impl Surface for CanvasSurface {
    fn width(&self) -> f32 {
        self.size.0
    }

    fn height(&self) -> f32 {
        self.size.1
    }

    fn set_offset(&mut self, offset: Vec2) {
        self.offset = offset;
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.ctx.set_fill_style_str(&color.css());
        self.ctx.fill_rect(
            (rect.x - self.offset.x) as f64,
            (rect.y - self.offset.y) as f64,
            rect.w as f64,
            rect.h as f64,
        );
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.ctx.set_fill_style_str(&color.css());
        self.ctx.begin_path();
        self.arc_path(center, radius, 0.0, std::f32::consts::TAU);
        self.ctx.fill();
    }

    fn fill_wedge(&mut self, center: Vec2, radius: f32, start: f32, end: f32, color: Color) {
        let c = center - self.offset;
        self.ctx.set_fill_style_str(&color.css());
        self.ctx.begin_path();
        self.ctx.move_to(c.x as f64, c.y as f64);
        self.arc_path(center, radius, start, end);
        self.ctx.close_path();
        self.ctx.fill();
    }

    fn fill_text(&mut self, text: &str, center: Vec2, size_px: f32, color: Color) {
        let c = center - self.offset;
        self.ctx.set_fill_style_str(&color.css());
        self.ctx.set_font(&format!("{}px Arial", size_px));
        self.ctx.set_text_align("center");
        let _ = self.ctx.fill_text(text, c.x as f64, c.y as f64);
    }
}
