use crate::input;
use glam::DVec2;
use sparkle_core::{Color, ColorStop, Surface};
use std::f64::consts::TAU;
use web_sys as web;

/// A `<canvas>` 2D context acting as one effect layer.
///
/// Drawing happens in CSS pixels; the backing store is scaled by the
/// device pixel ratio (re-read on every resize) through the context
/// transform.
pub struct CanvasSurface {
    canvas: web::HtmlCanvasElement,
    ctx: web::CanvasRenderingContext2d,
    width: f64,
    height: f64,
    dpr: f64,
}

impl CanvasSurface {
    pub fn new(canvas: web::HtmlCanvasElement, ctx: web::CanvasRenderingContext2d) -> Self {
        Self {
            canvas,
            ctx,
            width: 0.0,
            height: 0.0,
            dpr: 1.0,
        }
    }

    fn path_disc(&self, center: DVec2, radius: f64) -> bool {
        self.ctx.begin_path();
        self.ctx
            .arc(center.x, center.y, radius, 0.0, TAU)
            .is_ok()
    }
}

impl Surface for CanvasSurface {
    fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
        self.dpr = web::window()
            .map(|w| input::clamp_dpr(w.device_pixel_ratio()))
            .unwrap_or(1.0);
        let (bw, bh) = input::backing_size(width, height, self.dpr);
        // Assigning width/height resets the context state, transform included.
        self.canvas.set_width(bw);
        self.canvas.set_height(bh);
        if let Err(e) = self
            .ctx
            .set_transform(self.dpr, 0.0, 0.0, self.dpr, 0.0, 0.0)
        {
            log::warn!("[dom] set_transform failed: {:?}", e);
        }
    }

    fn clear(&mut self) {
        self.ctx.clear_rect(0.0, 0.0, self.width, self.height);
    }

    fn fill_radial(&mut self, center: DVec2, radius: f64, stops: &[ColorStop]) {
        if radius <= 0.0 || stops.is_empty() {
            return;
        }
        let Ok(gradient) = self
            .ctx
            .create_radial_gradient(center.x, center.y, 0.0, center.x, center.y, radius)
        else {
            return;
        };
        for s in stops {
            _ = gradient.add_color_stop(s.offset as f32, &s.color.to_css());
        }
        self.ctx.set_fill_style_canvas_gradient(&gradient);
        if self.path_disc(center, radius) {
            self.ctx.fill();
        }
    }

    fn fill_disc(&mut self, center: DVec2, radius: f64, color: Color) {
        if radius <= 0.0 {
            return;
        }
        self.ctx.set_fill_style_str(&color.to_css());
        if self.path_disc(center, radius) {
            self.ctx.fill();
        }
    }
}
