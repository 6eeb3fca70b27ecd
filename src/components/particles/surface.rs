//! The 2D drawing contract the renderer targets.
//!
//! Anything with canvas-like fill, stroke, text, and glow primitives can host
//! the particle field. The browser canvas context is the production
//! implementation; tests record calls instead.

use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::error::FieldError;
use super::theme::Color;

/// Immediate-mode 2D drawing surface.
pub trait Surface {
	/// Wipe the whole surface to transparent.
	fn clear(&mut self, width: f64, height: f64);

	fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Color);

	fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Color) -> Result<(), FieldError>;

	fn stroke_circle(
		&mut self,
		x: f64,
		y: f64,
		radius: f64,
		line_width: f64,
		color: Color,
	) -> Result<(), FieldError>;

	fn fill_text(
		&mut self,
		text: &str,
		x: f64,
		y: f64,
		font: &str,
		color: Color,
	) -> Result<(), FieldError>;

	/// Blur radius and color applied to subsequent fills and strokes.
	/// A blur of 0 turns the glow off.
	fn set_glow(&mut self, blur: f64, color: Color);
}

impl Surface for CanvasRenderingContext2d {
	fn clear(&mut self, width: f64, height: f64) {
		self.clear_rect(0.0, 0.0, width, height);
	}

	fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Color) {
		self.set_fill_style_str(&color.to_css());
		CanvasRenderingContext2d::fill_rect(self, x, y, width, height);
	}

	fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Color) -> Result<(), FieldError> {
		self.begin_path();
		self.arc(x, y, radius.max(0.0), 0.0, PI * 2.0)
			.map_err(|e| FieldError::surface("arc", e))?;
		self.set_fill_style_str(&color.to_css());
		self.fill();
		Ok(())
	}

	fn stroke_circle(
		&mut self,
		x: f64,
		y: f64,
		radius: f64,
		line_width: f64,
		color: Color,
	) -> Result<(), FieldError> {
		self.begin_path();
		self.arc(x, y, radius.max(0.0), 0.0, PI * 2.0)
			.map_err(|e| FieldError::surface("arc", e))?;
		self.set_stroke_style_str(&color.to_css());
		self.set_line_width(line_width);
		self.stroke();
		Ok(())
	}

	fn fill_text(
		&mut self,
		text: &str,
		x: f64,
		y: f64,
		font: &str,
		color: Color,
	) -> Result<(), FieldError> {
		self.set_font(font);
		self.set_fill_style_str(&color.to_css());
		CanvasRenderingContext2d::fill_text(self, text, x, y)
			.map_err(|e| FieldError::surface("fill_text", e))
	}

	fn set_glow(&mut self, blur: f64, color: Color) {
		self.set_shadow_blur(blur);
		self.set_shadow_color(&color.to_css());
	}
}
