use std::f64::consts::TAU;

use ambient_engine::{Color, DrawCommand, DrawList, Shadow, Surface, Viewport};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

/// Canvas 2D backend. Draws in CSS pixels; the context transform scales to
/// the backing store.
pub struct Canvas2dSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    viewport: Viewport,
}

impl Canvas2dSurface {
    /// Fails when the canvas has no 2D context.
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(JsValue::from)?;
        Ok(Self {
            canvas,
            ctx,
            viewport: Viewport::default(),
        })
    }

    fn apply_resize(&mut self, viewport: &Viewport) -> Result<(), JsValue> {
        self.viewport = *viewport;
        // Assigning the backing size also resets the context state.
        self.canvas.set_width(viewport.backing_width());
        self.canvas.set_height(viewport.backing_height());
        let style = self.canvas.style();
        style.set_property("width", &format!("{}px", viewport.css_width))?;
        style.set_property("height", &format!("{}px", viewport.css_height))?;
        let dpr = viewport.dpr as f64;
        self.ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0)
    }

    fn draw(&self, list: &DrawList, cmd: &DrawCommand) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        match *cmd {
            DrawCommand::Clear => {
                ctx.set_global_alpha(1.0);
                ctx.clear_rect(0.0, 0.0, self.viewport.css_width as f64, self.viewport.css_height as f64);
            }
            DrawCommand::Dot { pos, radius, color, alpha } => {
                ctx.begin_path();
                ctx.set_fill_style_str(&list.css(&color));
                ctx.set_global_alpha(alpha as f64);
                ctx.arc(pos.x as f64, pos.y as f64, radius as f64, 0.0, TAU)?;
                ctx.fill();
            }
            DrawCommand::Halo { pos, radius, inner, outer, alpha } => {
                let (x, y, r) = (pos.x as f64, pos.y as f64, radius as f64);
                let gradient = ctx.create_radial_gradient(x, y, 0.0, x, y, r)?;
                gradient.add_color_stop(0.0, &list.css(&inner))?;
                gradient.add_color_stop(0.4, &list.css(&outer))?;
                gradient.add_color_stop(1.0, &Color::Transparent.to_css(""))?;
                ctx.begin_path();
                ctx.set_fill_style_canvas_gradient(&gradient);
                ctx.set_global_alpha(alpha as f64);
                ctx.arc(x, y, r, 0.0, TAU)?;
                ctx.fill();
            }
            DrawCommand::Line { from, to, color, alpha, width, shadow } => {
                ctx.save();
                ctx.begin_path();
                ctx.set_stroke_style_str(&list.css(&color));
                ctx.set_global_alpha(alpha as f64);
                ctx.set_line_width(width as f64);
                if let Some(shadow) = shadow {
                    self.apply_shadow(list, &shadow);
                }
                ctx.move_to(from.x as f64, from.y as f64);
                ctx.line_to(to.x as f64, to.y as f64);
                ctx.stroke();
                ctx.restore();
            }
            DrawCommand::Spark { pos, core_radius, glow_radius, alpha, shadow } => {
                let (x, y) = (pos.x as f64, pos.y as f64);
                ctx.save();
                ctx.set_global_composite_operation(cmd.blend().composite_operation())?;
                let gradient = ctx.create_radial_gradient(x, y, 0.0, x, y, glow_radius as f64)?;
                gradient.add_color_stop(0.0, &Color::white((alpha + 0.05).min(1.0)).to_css(""))?;
                gradient.add_color_stop(0.4, &Color::white(alpha).to_css(""))?;
                gradient.add_color_stop(1.0, &Color::white(0.0).to_css(""))?;
                ctx.set_fill_style_canvas_gradient(&gradient);
                self.apply_shadow(list, &shadow);
                ctx.begin_path();
                ctx.arc(x, y, core_radius as f64, 0.0, TAU)?;
                ctx.fill();
                ctx.restore();
            }
            DrawCommand::Ring { center, radius, alpha, width, shadow } => {
                ctx.save();
                ctx.begin_path();
                ctx.set_stroke_style_str(&Color::white(alpha).to_css(""));
                ctx.set_line_width(width as f64);
                self.apply_shadow(list, &shadow);
                ctx.set_global_composite_operation(cmd.blend().composite_operation())?;
                ctx.arc(center.x as f64, center.y as f64, radius as f64, 0.0, TAU)?;
                ctx.stroke();
                ctx.restore();
            }
        }
        Ok(())
    }

    fn apply_shadow(&self, list: &DrawList, shadow: &Shadow) {
        self.ctx.set_shadow_color(&list.css(&shadow.color));
        self.ctx.set_shadow_blur(shadow.blur as f64);
    }
}

impl Surface for Canvas2dSurface {
    fn backend(&self) -> &'static str {
        "canvas2d"
    }

    fn resize(&mut self, viewport: &Viewport) {
        if let Err(e) = self.apply_resize(viewport) {
            log::warn!("canvas resize failed: {:?}", e);
        }
    }

    fn submit(&mut self, list: &DrawList) {
        for cmd in list.iter() {
            if let Err(e) = self.draw(list, cmd) {
                log::warn!("canvas draw failed: {:?}", e);
                break;
            }
        }
        self.ctx.set_global_alpha(1.0);
    }
}
