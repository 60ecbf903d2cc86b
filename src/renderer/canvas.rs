//! Canvas2D renderer
//!
//! Draws the pool back to front in insertion order, so the newest donut ends
//! up on top (the same donut `find_at` picks).

use std::f64::consts::TAU;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::shapes::{HOLE_RATIO, body_scale, dough_gradient, dough_stops, drizzle_points, sprinkle_segment};
use crate::sim::{Donut, Playground, Speck};
use crate::theme::{Color, Palette};

pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
    pub size: (u32, u32),
}

impl CanvasRenderer {
    pub fn new(canvas: &HtmlCanvasElement) -> Option<Self> {
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(Self {
            ctx,
            size: (canvas.width(), canvas.height()),
        })
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.size = (width, height);
    }

    /// Draw one frame
    pub fn render(&self, playground: &Playground) -> Result<(), JsValue> {
        let palette = playground.palette();
        let (w, h) = (self.size.0 as f64, self.size.1 as f64);

        self.ctx.set_fill_style_str(&palette.background.to_css());
        self.ctx.fill_rect(0.0, 0.0, w, h);

        for donut in playground.pool.iter() {
            self.draw_donut(donut, palette)?;
        }
        Ok(())
    }

    fn draw_donut(&self, donut: &Donut, palette: &Palette) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        ctx.save();
        let drawn = self.draw_body(donut, palette);
        ctx.restore();
        drawn
    }

    /// Body, hole and toppings in donut-local coordinates. Must run between
    /// `save` and `restore`.
    fn draw_body(&self, donut: &Donut, palette: &Palette) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        let r = donut.radius as f64;
        let base = donut.decoration.base_color;
        let scale = body_scale(donut);

        ctx.translate(donut.pos.x as f64, donut.pos.y as f64)?;
        ctx.scale(scale.x as f64, scale.y as f64)?;

        ctx.set_shadow_blur(donut.glow as f64);
        ctx.set_shadow_color(&base.to_css());

        let (inner, inner_r, outer_r) = dough_gradient(donut.radius);
        let gradient = ctx.create_radial_gradient(
            inner.x as f64,
            inner.y as f64,
            inner_r as f64,
            0.0,
            0.0,
            outer_r as f64,
        )?;
        for (offset, color) in dough_stops(palette, base) {
            gradient.add_color_stop(offset, &color.to_css())?;
        }

        ctx.begin_path();
        ctx.arc(0.0, 0.0, r, 0.0, TAU)?;
        ctx.set_fill_style_canvas_gradient(&gradient);
        ctx.fill();

        ctx.set_shadow_blur(0.0);
        ctx.begin_path();
        ctx.arc(0.0, 0.0, r * HOLE_RATIO as f64, 0.0, TAU)?;
        ctx.set_fill_style_str(&palette.hole.to_css());
        ctx.fill();

        self.draw_toppings(donut, palette)
    }

    fn draw_toppings(&self, donut: &Donut, palette: &Palette) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        let deco = &donut.decoration;

        ctx.set_line_width(2.0);
        for sprinkle in &deco.sprinkles {
            let (a, b) = sprinkle_segment(sprinkle);
            ctx.begin_path();
            ctx.set_stroke_style_str(&sprinkle.color.to_css());
            ctx.move_to(a.x as f64, a.y as f64);
            ctx.line_to(b.x as f64, b.y as f64);
            ctx.stroke();
        }

        if deco.drizzle {
            ctx.set_stroke_style_str(&palette.drizzle.to_css());
            ctx.set_line_width(3.0);
            ctx.begin_path();
            for (i, p) in drizzle_points(donut.radius).iter().enumerate() {
                if i == 0 {
                    ctx.move_to(p.x as f64, p.y as f64);
                } else {
                    ctx.line_to(p.x as f64, p.y as f64);
                }
            }
            ctx.stroke();
        }

        self.draw_specks(&deco.powdered, palette.powdered)?;
        self.draw_specks(&deco.cinnamon, palette.cinnamon)?;
        self.draw_specks(&deco.gold_flakes, palette.gold_flake)?;
        Ok(())
    }

    fn draw_specks(&self, specks: &[Speck], color: Color) -> Result<(), JsValue> {
        if specks.is_empty() {
            return Ok(());
        }
        let ctx = &self.ctx;
        ctx.set_fill_style_str(&color.to_css());
        for speck in specks {
            ctx.begin_path();
            ctx.arc(
                speck.offset.x as f64,
                speck.offset.y as f64,
                speck.size as f64,
                0.0,
                TAU,
            )?;
            ctx.fill();
        }
        Ok(())
    }
}
