use glam::Vec2;
use sphere_core::{BlendMode, DrawSurface, Rgba};
use web_sys as web;

/// [`DrawSurface`] over a 2D canvas context already scaled for DPR.
pub struct CanvasSurface {
    canvas: web::HtmlCanvasElement,
    ctx: web::CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(canvas: web::HtmlCanvasElement, ctx: web::CanvasRenderingContext2d) -> Self {
        Self { canvas, ctx }
    }

    pub fn canvas(&self) -> &web::HtmlCanvasElement {
        &self.canvas
    }

    pub fn context(&self) -> &web::CanvasRenderingContext2d {
        &self.ctx
    }
}

impl DrawSurface for CanvasSurface {
    fn size(&self) -> Vec2 {
        let w = match self.canvas.client_width() {
            0 => self.canvas.width() as f32,
            w => w as f32,
        };
        let h = match self.canvas.client_height() {
            0 => self.canvas.height() as f32,
            h => h as f32,
        };
        Vec2::new(w, h)
    }

    fn set_blend_mode(&mut self, mode: BlendMode) {
        let _ = self.ctx.set_global_composite_operation(mode.as_css());
    }

    fn set_global_alpha(&mut self, alpha: f32) {
        self.ctx.set_global_alpha(alpha as f64);
    }

    fn set_fill_style(&mut self, color: Rgba) {
        self.ctx.set_fill_style_str(&color.to_css());
    }

    fn set_stroke_style(&mut self, color: Rgba) {
        self.ctx.set_stroke_style_str(&color.to_css());
    }

    fn set_line_width(&mut self, width: f32) {
        self.ctx.set_line_width(width as f64);
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
        self.ctx.fill_rect(x as f64, y as f64, w as f64, h as f64);
    }

    fn begin_path(&mut self) {
        self.ctx.begin_path();
    }

    fn move_to(&mut self, p: Vec2) {
        self.ctx.move_to(p.x as f64, p.y as f64);
    }

    fn line_to(&mut self, p: Vec2) {
        self.ctx.line_to(p.x as f64, p.y as f64);
    }

    fn stroke(&mut self) {
        self.ctx.stroke();
    }
}
