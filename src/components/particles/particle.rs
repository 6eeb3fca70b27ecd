//! Point particles: spawn presets, per-frame physics, and liveness.
//!
//! Every kind shares one plain record; the kind discriminant selects the
//! spawn preset and the confinement rule. The owning field stores them in a
//! contiguous `Vec` and culls in place.

use rand::Rng;

use super::config::{GlyphPreset, SplashPreset, TrailPreset};
use super::theme::{Color, WHITE};

/// Life at or below this counts as dead; absorbs rounding from repeated
/// subtraction of the decay rate.
pub const LIFE_EPSILON: f64 = 1e-9;

/// A position in surface space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
	pub x: f64,
	pub y: f64,
}

impl Point {
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}

	/// Input coordinates must be finite and non-negative.
	pub fn is_valid_input(self) -> bool {
		self.x.is_finite() && self.y.is_finite() && self.x >= 0.0 && self.y >= 0.0
	}

	pub fn distance(self, other: Point) -> f64 {
		let (dx, dy) = (other.x - self.x, other.y - self.y);
		(dx * dx + dy * dy).sqrt()
	}

	pub fn lerp(self, other: Point, t: f64) -> Point {
		Point::new(
			self.x + (other.x - self.x) * t,
			self.y + (other.y - self.y) * t,
		)
	}
}

/// Behavioral variant of a visual element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Kind {
	Trail,
	Glyph,
	Splash,
	Ripple,
}

/// Current pixel dimensions of the drawing surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
	pub width: f64,
	pub height: f64,
}

/// Which edges cull a particle once it strays past them.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Confinement {
	/// Culled by life only.
	Free,
	/// Culled once below the bottom edge by more than the margin.
	Below(f64),
	/// Culled once outside any edge by more than the margin.
	Within(f64),
}

/// Glyph-only state.
#[derive(Clone, Debug, PartialEq)]
pub struct GlyphState {
	pub ch: char,
	pub alpha: f64,
	pub reroll_every: u32,
	pub frames: u32,
	pub landed: bool,
}

/// A single transient visual element.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
	pub kind: Kind,
	pub x: f64,
	pub y: f64,
	pub vx: f64,
	pub vy: f64,
	pub size: f64,
	/// Remaining life in `(0, 1]`; 1 on spawn.
	pub life: f64,
	/// Life consumed per frame.
	pub decay: f64,
	/// Added to `vy` each frame.
	pub gravity: f64,
	/// Velocity multiplier applied each frame.
	pub friction: f64,
	pub color: Color,
	pub confinement: Confinement,
	pub glyph: Option<GlyphState>,
}

/// Side effects of one `advance` that the owning field must act on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StepEvents {
	/// The glyph is due for a new character.
	pub reroll: bool,
	/// The glyph reached the bottom edge for the first time.
	pub landed: bool,
}

/// Uniform sample in `[min, max)`; collapses to `min` for an empty range or
/// one whose width overflows `f64`.
pub fn uniform(rng: &mut impl Rng, min: f64, max: f64) -> f64 {
	if max > min && (max - min).is_finite() {
		rng.gen_range(min..max)
	} else {
		min
	}
}

/// Uniform count in `[min, max]`; collapses to `min` for an inverted range.
pub fn uniform_count(rng: &mut impl Rng, min: usize, max: usize) -> usize {
	if max > min { rng.gen_range(min..=max) } else { min }
}

/// Uniform pick from a palette.
pub fn pick_color(rng: &mut impl Rng, palette: &[Color]) -> Color {
	if palette.is_empty() {
		WHITE
	} else {
		palette[rng.gen_range(0..palette.len())]
	}
}

impl Particle {
	pub fn trail(origin: Point, preset: &TrailPreset, palette: &[Color], rng: &mut impl Rng) -> Self {
		Self {
			kind: Kind::Trail,
			x: origin.x,
			y: origin.y,
			vx: uniform(rng, -preset.speed, preset.speed),
			vy: uniform(rng, -preset.speed, preset.speed),
			size: uniform(rng, preset.size_min, preset.size_max),
			life: 1.0,
			decay: uniform(rng, preset.decay_min, preset.decay_max),
			gravity: 0.0,
			friction: 1.0,
			color: pick_color(rng, palette),
			confinement: Confinement::Free,
			glyph: None,
		}
	}

	pub fn glyph(
		origin: Point,
		ch: char,
		preset: &GlyphPreset,
		palette: &[Color],
		rng: &mut impl Rng,
	) -> Self {
		let reroll_min = preset.reroll_min.max(1);
		let reroll_every = if preset.reroll_max > reroll_min {
			rng.gen_range(reroll_min..preset.reroll_max)
		} else {
			reroll_min
		};
		Self {
			kind: Kind::Glyph,
			x: origin.x,
			y: origin.y,
			vx: 0.0,
			vy: uniform(rng, preset.speed_min, preset.speed_max),
			size: preset.font_size,
			life: 1.0,
			decay: 0.0,
			gravity: 0.0,
			friction: 1.0,
			color: pick_color(rng, palette),
			confinement: Confinement::Below(preset.bottom_margin),
			glyph: Some(GlyphState {
				ch,
				alpha: uniform(rng, preset.alpha_min, preset.alpha_max),
				reroll_every,
				frames: 0,
				landed: false,
			}),
		}
	}

	pub fn splash(origin: Point, preset: &SplashPreset, palette: &[Color], rng: &mut impl Rng) -> Self {
		Self {
			kind: Kind::Splash,
			x: origin.x,
			y: origin.y,
			vx: uniform(rng, -preset.spread, preset.spread),
			vy: -uniform(rng, preset.lift_min, preset.lift_max),
			size: uniform(rng, preset.size_min, preset.size_max),
			life: 1.0,
			decay: uniform(rng, preset.decay_min, preset.decay_max),
			gravity: preset.gravity,
			friction: preset.friction,
			color: pick_color(rng, palette),
			confinement: Confinement::Within(preset.margin),
			glyph: None,
		}
	}

	/// Advance one frame.
	pub fn advance(&mut self, bounds: Bounds) -> StepEvents {
		self.x += self.vx;
		self.y += self.vy;
		self.vy += self.gravity;
		self.vx *= self.friction;
		self.vy *= self.friction;
		self.life -= self.decay;

		let mut events = StepEvents::default();
		if let Some(glyph) = &mut self.glyph {
			glyph.frames += 1;
			events.reroll = glyph.frames % glyph.reroll_every == 0;
			if !glyph.landed && self.y >= bounds.height {
				glyph.landed = true;
				events.landed = true;
			}
		}
		events
	}

	pub fn is_alive(&self, bounds: Bounds) -> bool {
		if self.life <= LIFE_EPSILON {
			return false;
		}
		match self.confinement {
			Confinement::Free => true,
			Confinement::Below(margin) => self.y <= bounds.height + margin,
			Confinement::Within(margin) => {
				self.x >= -margin
					&& self.x <= bounds.width + margin
					&& self.y >= -margin
					&& self.y <= bounds.height + margin
			}
		}
	}

	/// Draw opacity: the glyph's fixed alpha, otherwise remaining life.
	pub fn alpha(&self) -> f64 {
		match &self.glyph {
			Some(glyph) => glyph.alpha,
			None => self.life.clamp(0.0, 1.0),
		}
	}
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;
	use rand::rngs::SmallRng;

	use super::*;
	use crate::components::particles::theme::{palette, Color};

	const BOUNDS: Bounds = Bounds {
		width: 800.0,
		height: 600.0,
	};

	fn rng() -> SmallRng {
		SmallRng::seed_from_u64(7)
	}

	fn trail_with_decay(decay: f64) -> Particle {
		let mut p = Particle::trail(
			Point::new(100.0, 100.0),
			&TrailPreset::default(),
			palette(Kind::Trail, true),
			&mut rng(),
		);
		p.decay = decay;
		p
	}

	#[test]
	fn trail_spawn_respects_presets() {
		let preset = TrailPreset::default();
		let colors = palette(Kind::Trail, false);
		let mut rng = rng();
		for _ in 0..500 {
			let p = Particle::trail(Point::new(5.0, 5.0), &preset, colors, &mut rng);
			assert_eq!(p.life, 1.0);
			assert!((-1.0..=1.0).contains(&p.vx) && (-1.0..=1.0).contains(&p.vy));
			assert!((2.0..6.0).contains(&p.size));
			assert!((0.008..0.023).contains(&p.decay));
			assert!(colors.contains(&p.color));
			assert_eq!(p.gravity, 0.0);
		}
	}

	#[test]
	fn decay_is_exact_per_frame() {
		let mut p = trail_with_decay(0.017);
		let mut expected = p.life;
		for _ in 0..20 {
			p.advance(BOUNDS);
			expected -= 0.017;
			assert_eq!(p.life, expected);
		}
	}

	#[test]
	fn trail_with_decay_two_percent_dies_after_fifty_frames() {
		let mut p = trail_with_decay(0.02);
		for frame in 1..=50 {
			p.advance(BOUNDS);
			if frame < 50 {
				assert!(p.is_alive(BOUNDS), "died early at frame {frame}");
			}
		}
		assert!(!p.is_alive(BOUNDS));
	}

	#[test]
	fn lifetime_is_bounded_by_inverse_decay() {
		for decay in [0.008, 0.011, 0.013, 0.02, 0.023] {
			let mut p = trail_with_decay(decay);
			let mut frames_alive = 0;
			loop {
				p.advance(BOUNDS);
				if !p.is_alive(BOUNDS) {
					break;
				}
				frames_alive += 1;
			}
			assert!(frames_alive as f64 <= (1.0 / decay).ceil(), "decay {decay}");
		}
	}

	#[test]
	fn splash_rises_then_falls_under_gravity() {
		let preset = SplashPreset::default();
		let mut p = Particle::splash(
			Point::new(400.0, 600.0),
			&preset,
			palette(Kind::Splash, true),
			&mut rng(),
		);
		assert!(p.vy <= -2.0 && p.vy > -8.0);
		assert!(p.vx.abs() <= 2.0);

		let start_vx = p.vx;
		let vy0 = p.vy;
		p.advance(BOUNDS);
		assert!((p.vy - (vy0 + 0.3) * 0.98).abs() < 1e-12);
		assert!((p.vx - start_vx * 0.98).abs() < 1e-12);

		for _ in 0..40 {
			p.advance(BOUNDS);
		}
		assert!(p.vy > 0.0);
	}

	#[test]
	fn glyph_ignores_life_and_dies_past_bottom_margin() {
		let mut p = Particle::glyph(
			Point::new(28.0, 590.0),
			'A',
			&GlyphPreset::default(),
			palette(Kind::Glyph, true),
			&mut rng(),
		);
		p.vy = 2.0;
		let mut landed = 0;
		while p.y <= 700.0 {
			assert!(p.is_alive(BOUNDS));
			if p.advance(BOUNDS).landed {
				landed += 1;
			}
		}
		assert_eq!(p.life, 1.0);
		assert_eq!(landed, 1);
		assert!(!p.is_alive(BOUNDS));
	}

	#[test]
	fn glyph_rerolls_on_its_interval() {
		let mut p = Particle::glyph(
			Point::new(0.0, -100.0),
			'A',
			&GlyphPreset::default(),
			palette(Kind::Glyph, true),
			&mut rng(),
		);
		let every = p.glyph.as_ref().unwrap().reroll_every;
		assert!((10..30).contains(&every));
		let rerolls = (0..every * 3).filter(|_| p.advance(BOUNDS).reroll).count();
		assert_eq!(rerolls, 3);
	}

	#[test]
	fn splash_is_confined_on_every_side() {
		let mut p = Particle::splash(
			Point::new(0.0, 0.0),
			&SplashPreset::default(),
			&[Color::rgb(1, 2, 3)],
			&mut rng(),
		);
		p.x = -101.0;
		assert!(!p.is_alive(BOUNDS));
		p.x = 10.0;
		p.y = -99.0;
		assert!(p.is_alive(BOUNDS));
	}

	#[test]
	fn invalid_input_points() {
		assert!(Point::new(0.0, 0.0).is_valid_input());
		assert!(!Point::new(-1.0, 3.0).is_valid_input());
		assert!(!Point::new(f64::NAN, 3.0).is_valid_input());
		assert!(!Point::new(3.0, f64::INFINITY).is_valid_input());
	}

	#[test]
	fn inverted_ranges_collapse() {
		let mut rng = rng();
		assert_eq!(uniform(&mut rng, 4.0, 1.0), 4.0);
		assert_eq!(uniform(&mut rng, -1e308, 1e308), -1e308);
		assert_eq!(uniform(&mut rng, 0.0, f64::NAN), 0.0);
		assert_eq!(uniform_count(&mut rng, 5, 2), 5);
		assert_eq!(pick_color(&mut rng, &[]), WHITE);
	}
}
