//! Drawing the field.
//!
//! Every frame clears the surface and draws each point as a filled disc in
//! its gradient color, with a shadow of the same color. The page background
//! and the blur overlay live outside the canvas (see the component).

use std::f64::consts::TAU;

use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::state::GradientState;

/// The drawing operations the renderer needs.
pub trait Surface {
	/// Width in px.
	fn width(&self) -> f64;
	/// Height in px.
	fn height(&self) -> f64;
	/// Erase the whole surface to transparent.
	fn clear(&mut self);
	/// Fill a circle and give it a blurred shadow in the same color.
	fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: &str, shadow_blur: f64);
}

/// A 2D canvas context and the canvas it belongs to.
pub struct CanvasSurface {
	canvas: HtmlCanvasElement,
	ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
	/// Draw through `ctx`, sized by `canvas`.
	pub fn new(canvas: HtmlCanvasElement, ctx: CanvasRenderingContext2d) -> Self {
		Self { canvas, ctx }
	}
}

impl Surface for CanvasSurface {
	fn width(&self) -> f64 {
		self.canvas.width() as f64
	}

	fn height(&self) -> f64 {
		self.canvas.height() as f64
	}

	fn clear(&mut self) {
		self.ctx.clear_rect(0.0, 0.0, self.width(), self.height());
	}

	fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: &str, shadow_blur: f64) {
		self.ctx.set_shadow_blur(shadow_blur);
		self.ctx.set_shadow_color(color);
		self.ctx.begin_path();
		let _ = self.ctx.arc(x, y, radius, 0.0, TAU);
		self.ctx.set_fill_style_str(color);
		self.ctx.fill();
	}
}

/// Render the current state to the surface.
pub fn render<S: Surface + ?Sized>(state: &GradientState, surface: &mut S) {
	surface.clear();

	let palette = state.palette();
	let shadow = state.config().shadow;
	for (p, progress) in state.field().iter() {
		let color = palette.sample(progress, p.random_offset).to_css_rgb();
		surface.fill_circle(p.x, p.y, p.radius, &color, shadow);
	}
}
