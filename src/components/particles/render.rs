//! Per-frame drawing of a particle field.
//!
//! Passes, bottom to top:
//! 1. Clear, or fade the previous frame for an afterimage
//! 2. Ripples (outer ring, then inner ring)
//! 3. Point particles and glyphs
//! 4. Pointer indicator (glow, ring, dot)

use super::config::ClearMode;
use super::error::FieldError;
use super::field::ParticleField;
use super::particle::{Kind, Particle, Point, LIFE_EPSILON};
use super::ripple::Ripple;
use super::surface::Surface;
use super::theme::{cursor_colors, Color};

const CURSOR_GLOW_RADIUS: f64 = 25.0;
const CURSOR_RING_RADIUS: f64 = 15.0;
const CURSOR_DOT_RADIUS: f64 = 4.0;
const GLYPH_DOT_RADIUS: f64 = 1.5;

/// Renders the complete field to the surface.
pub fn render<S: Surface + ?Sized>(field: &ParticleField, surface: &mut S) -> Result<(), FieldError> {
	let bounds = field.bounds();
	if bounds.width <= 0.0 || bounds.height <= 0.0 {
		return Ok(());
	}
	let config = field.config();

	match config.clear {
		ClearMode::Clear => surface.clear(bounds.width, bounds.height),
		ClearMode::Fade(color) => surface.fill_rect(0.0, 0.0, bounds.width, bounds.height, color),
	}

	for ripple in field.ripples() {
		draw_ripple(surface, ripple, config.presets.ripple.glow_blur)?;
	}

	let font = format!("{}px monospace", config.presets.glyph.font_size);
	for p in field.particles() {
		if p.life <= LIFE_EPSILON {
			continue;
		}
		match p.kind {
			Kind::Glyph => draw_glyph(surface, p, &font, config.presets.glyph.glow_blur)?,
			Kind::Splash => draw_dot(surface, p, config.presets.splash.glow_blur)?,
			Kind::Trail => draw_dot(surface, p, config.presets.trail.glow_blur)?,
			Kind::Ripple => {}
		}
	}

	if config.show_cursor {
		if let Some(at) = field.cursor() {
			draw_cursor(surface, at, field.is_dark())?;
		}
	}

	surface.set_glow(0.0, Color::rgba(0, 0, 0, 0.0));
	Ok(())
}

fn draw_ripple<S: Surface + ?Sized>(surface: &mut S, ripple: &Ripple, blur: f64) -> Result<(), FieldError> {
	let (opacity, width) = (ripple.opacity(), ripple.stroke_width());
	let Point { x, y } = ripple.center;

	surface.set_glow(blur, ripple.outer.with_alpha(opacity));
	surface.stroke_circle(x, y, ripple.radius, width, ripple.outer.with_alpha(opacity))?;

	surface.set_glow(blur * 2.0 / 3.0, ripple.inner.with_alpha(opacity * 0.5));
	surface.stroke_circle(
		x,
		y,
		ripple.radius * ripple.inner_scale,
		width * 0.5,
		ripple.inner.with_alpha(opacity * 0.6),
	)
}

fn draw_dot<S: Surface + ?Sized>(surface: &mut S, p: &Particle, blur: f64) -> Result<(), FieldError> {
	let color = p.color.with_alpha(p.alpha());
	surface.set_glow(blur, color);
	surface.fill_circle(p.x, p.y, p.size, color)
}

fn draw_glyph<S: Surface + ?Sized>(
	surface: &mut S,
	p: &Particle,
	font: &str,
	blur: f64,
) -> Result<(), FieldError> {
	let Some(glyph) = &p.glyph else {
		return Ok(());
	};
	let alpha = p.alpha();
	let color = p.color.with_alpha(alpha);
	let mut buf = [0u8; 4];

	surface.set_glow(blur, p.color.with_alpha(alpha * 0.8));
	surface.fill_text(glyph.ch.encode_utf8(&mut buf), p.x, p.y, font, color)?;
	surface.fill_circle(p.x + p.size / 2.0, p.y - 2.0, GLYPH_DOT_RADIUS, color)
}

fn draw_cursor<S: Surface + ?Sized>(surface: &mut S, at: Point, dark: bool) -> Result<(), FieldError> {
	let colors = cursor_colors(dark);

	surface.set_glow(0.0, Color::rgba(0, 0, 0, 0.0));
	surface.fill_circle(at.x, at.y, CURSOR_GLOW_RADIUS, colors.ring.with_alpha(0.08))?;
	surface.stroke_circle(at.x, at.y, CURSOR_RING_RADIUS, 1.5, colors.ring.with_alpha(0.3))?;

	surface.set_glow(15.0, colors.ring.with_alpha(0.6));
	surface.fill_circle(at.x, at.y, CURSOR_DOT_RADIUS, colors.dot.with_alpha(0.9))
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::particles::config::{FieldConfig, InputConfig, Presets};
	use crate::components::particles::theme::RAIN_FADE;

	#[derive(Clone, Debug, PartialEq)]
	enum Op {
		Clear,
		FillRect(Color),
		FillCircle { x: f64, y: f64, r: f64, alpha: f64 },
		StrokeCircle { r: f64, width: f64, alpha: f64 },
		Text(String),
		Glow(f64),
	}

	#[derive(Default)]
	struct Recorder {
		ops: Vec<Op>,
	}

	impl Surface for Recorder {
		fn clear(&mut self, _: f64, _: f64) {
			self.ops.push(Op::Clear);
		}

		fn fill_rect(&mut self, _: f64, _: f64, _: f64, _: f64, color: Color) {
			self.ops.push(Op::FillRect(color));
		}

		fn fill_circle(&mut self, x: f64, y: f64, r: f64, color: Color) -> Result<(), FieldError> {
			self.ops.push(Op::FillCircle { x, y, r, alpha: color.a });
			Ok(())
		}

		fn stroke_circle(
			&mut self,
			_: f64,
			_: f64,
			r: f64,
			width: f64,
			color: Color,
		) -> Result<(), FieldError> {
			self.ops.push(Op::StrokeCircle {
				r,
				width,
				alpha: color.a,
			});
			Ok(())
		}

		fn fill_text(&mut self, text: &str, _: f64, _: f64, font: &str, _: Color) -> Result<(), FieldError> {
			assert_eq!(font, "14px monospace");
			self.ops.push(Op::Text(text.to_string()));
			Ok(())
		}

		fn set_glow(&mut self, blur: f64, _: Color) {
			self.ops.push(Op::Glow(blur));
		}
	}

	/// Fails every fill, like a context that lost its backing store.
	struct Broken;

	impl Surface for Broken {
		fn clear(&mut self, _: f64, _: f64) {}
		fn fill_rect(&mut self, _: f64, _: f64, _: f64, _: f64, _: Color) {}
		fn fill_circle(&mut self, _: f64, _: f64, _: f64, _: Color) -> Result<(), FieldError> {
			Err(FieldError::Surface {
				op: "arc",
				message: "detached".into(),
			})
		}
		fn stroke_circle(&mut self, _: f64, _: f64, _: f64, _: f64, _: Color) -> Result<(), FieldError> {
			Ok(())
		}
		fn fill_text(&mut self, _: &str, _: f64, _: f64, _: &str, _: Color) -> Result<(), FieldError> {
			Ok(())
		}
		fn set_glow(&mut self, _: f64, _: Color) {}
	}

	fn trail_field() -> ParticleField {
		let config = FieldConfig {
			ripples: true,
			..FieldConfig::cursor_trail(Presets::default(), InputConfig::default())
		};
		ParticleField::new(config, 400.0, 300.0, 8)
	}

	fn circles(ops: &[Op]) -> Vec<&Op> {
		ops.iter().filter(|op| matches!(op, Op::FillCircle { .. })).collect()
	}

	#[test]
	fn trail_frame_clears_then_draws_particles_and_cursor() {
		let mut field = trail_field();
		field.pointer_move(Point::new(50.0, 60.0), 0.0);
		let mut rec = Recorder::default();
		render(&field, &mut rec).unwrap();

		assert_eq!(rec.ops[0], Op::Clear);
		let fills = circles(&rec.ops);
		// Two particles, cursor glow, cursor dot.
		assert_eq!(fills.len(), 4);
		assert!(matches!(fills[2], Op::FillCircle { r, alpha, .. } if *r == 25.0 && *alpha == 0.08));
		assert!(matches!(fills[3], Op::FillCircle { x, y, r, .. } if (*x, *y, *r) == (50.0, 60.0, 4.0)));
		assert!(rec.ops.contains(&Op::StrokeCircle {
			r: 15.0,
			width: 1.5,
			alpha: 0.3
		}));
		assert_eq!(rec.ops.last(), Some(&Op::Glow(0.0)));
	}

	#[test]
	fn cursor_is_hidden_after_touch_end() {
		let mut field = trail_field();
		field.touch_start(Point::new(50.0, 60.0), 0.0);
		field.touch_end(10.0);
		let mut rec = Recorder::default();
		render(&field, &mut rec).unwrap();
		assert!(circles(&rec.ops).iter().all(|op| !matches!(op, Op::FillCircle { r, .. } if *r == 25.0)));
	}

	#[test]
	fn ripple_draws_outer_and_inner_rings() {
		let mut field = trail_field();
		field.click(Point::new(100.0, 100.0), 0.0);
		for _ in 0..25 {
			field.tick(16.0);
		}
		let mut rec = Recorder::default();
		render(&field, &mut rec).unwrap();
		let rings: Vec<_> = rec
			.ops
			.iter()
			.filter(|op| matches!(op, Op::StrokeCircle { .. }))
			.collect();
		// Outer and inner ring of the first ripple, cursor ring is absent.
		assert_eq!(rings.len(), 2);
		assert!(circles(&rec.ops).is_empty());
		assert_eq!(
			rings[0],
			&Op::StrokeCircle {
				r: 75.0,
				width: 2.0,
				alpha: 0.5
			}
		);
		assert!(matches!(rings[1], Op::StrokeCircle { r, width, alpha }
			if (*r - 52.5).abs() < 1e-9 && *width == 1.0 && (*alpha - 0.3).abs() < 1e-9));
	}

	#[test]
	fn rain_frame_fades_and_draws_glyphs() {
		let config = FieldConfig::letter_rain(Presets::default(), InputConfig::default());
		let mut field = ParticleField::new(config, 140.0, 300.0, 8);
		field.tick(0.0);
		field.tick(16.0);
		let mut rec = Recorder::default();
		render(&field, &mut rec).unwrap();
		assert_eq!(rec.ops[0], Op::FillRect(RAIN_FADE));
		let texts = rec.ops.iter().filter(|op| matches!(op, Op::Text(_))).count();
		assert_eq!(texts, field.glyph_count());
		assert_eq!(circles(&rec.ops).len(), field.glyph_count());
	}

	#[test]
	fn zero_sized_surface_draws_nothing() {
		let config = FieldConfig::cursor_trail(Presets::default(), InputConfig::default());
		let mut field = ParticleField::new(config, 0.0, 0.0, 1);
		field.pointer_move(Point::new(1.0, 1.0), 0.0);
		let mut rec = Recorder::default();
		render(&field, &mut rec).unwrap();
		assert!(rec.ops.is_empty());
	}

	#[test]
	fn surface_errors_propagate_to_the_frame_loop() {
		let mut field = trail_field();
		field.pointer_move(Point::new(1.0, 1.0), 0.0);
		let err = render(&field, &mut Broken).unwrap_err();
		assert!(matches!(err, FieldError::Surface { op: "arc", .. }));
	}
}
