//! The owning particle collection and its per-frame update.
//!
//! Created when an overlay mounts and dropped when it unmounts. The frame
//! callback calls [`ParticleField::tick`] and then renders; input callbacks
//! append through the methods in `input.rs`. Everything runs on the single
//! browser event loop, so the field is shared as `Rc<RefCell<_>>`.

use log::debug;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::config::{DEFAULT_CHARSET, FieldConfig};
use super::input::PointerState;
use super::particle::{uniform, uniform_count, Bounds, Kind, Particle, Point};
use super::ripple::Ripple;
use super::theme::palette;

/// Frames between reads of the page theme.
pub const THEME_SAMPLE_FRAMES: u64 = 15;

/// A ripple waiting for its start time.
#[derive(Clone, Copy, Debug, PartialEq)]
struct PendingRipple {
	due_ms: f64,
	center: Point,
}

pub struct ParticleField {
	config: FieldConfig,
	particles: Vec<Particle>,
	ripples: Vec<Ripple>,
	pending_ripples: Vec<PendingRipple>,
	pub(super) pointer: PointerState,
	bounds: Bounds,
	dark: bool,
	frame: u64,
	glyph_chars: Vec<char>,
	rng: SmallRng,
}

impl ParticleField {
	pub fn new(config: FieldConfig, width: f64, height: f64, seed: u64) -> Self {
		let mut glyph_chars: Vec<char> = config.presets.glyph.charset.chars().collect();
		if glyph_chars.is_empty() {
			glyph_chars = DEFAULT_CHARSET.chars().collect();
		}
		Self {
			particles: Vec::with_capacity(config.max_particles.min(512)),
			config,
			ripples: Vec::new(),
			pending_ripples: Vec::new(),
			pointer: PointerState::default(),
			bounds: Bounds { width, height },
			dark: false,
			frame: 0,
			glyph_chars,
			rng: SmallRng::seed_from_u64(seed),
		}
	}

	pub fn config(&self) -> &FieldConfig {
		&self.config
	}

	pub fn particles(&self) -> &[Particle] {
		&self.particles
	}

	pub fn ripples(&self) -> &[Ripple] {
		&self.ripples
	}

	/// Last valid pointer position, `None` once a touch ends.
	pub fn cursor(&self) -> Option<Point> {
		self.pointer.cursor()
	}

	pub fn bounds(&self) -> Bounds {
		self.bounds
	}

	pub fn frame(&self) -> u64 {
		self.frame
	}

	pub fn is_dark(&self) -> bool {
		self.dark
	}

	/// Whether the host should re-read the page theme before the next tick.
	pub fn theme_due(&self) -> bool {
		self.frame % THEME_SAMPLE_FRAMES == 0
	}

	/// Only affects particles constructed from now on.
	pub fn set_dark(&mut self, dark: bool) {
		self.dark = dark;
	}

	/// Live particles keep their absolute positions and are culled naturally
	/// if they end up outside the new bounds.
	pub fn resize(&mut self, width: f64, height: f64) {
		debug!("particle field resized to {}x{}", width, height);
		self.bounds = Bounds { width, height };
	}

	/// Drop every particle, ripple, and queued ripple.
	pub fn clear(&mut self) {
		self.particles.clear();
		self.ripples.clear();
		self.pending_ripples.clear();
		self.pointer = PointerState::default();
	}

	/// Glyph columns that fit across the surface.
	pub fn columns(&self) -> usize {
		let font_size = self.config.presets.glyph.font_size;
		if font_size > 0.0 && self.bounds.width > 0.0 {
			(self.bounds.width / font_size).floor() as usize
		} else {
			0
		}
	}

	/// Steady-state count of live glyphs the ambient spawner aims for.
	pub fn density_target(&self) -> usize {
		(self.columns() as f64 * self.config.presets.glyph.density.max(0.0)).floor() as usize
	}

	pub fn glyph_count(&self) -> usize {
		self.particles.iter().filter(|p| p.kind == Kind::Glyph).count()
	}

	/// Spawn one element of `kind` at `origin`, or a whole burst for splashes.
	/// Returns how many were added; 0 when the origin is not finite or the
	/// particle cap is reached.
	pub fn spawn(&mut self, kind: Kind, origin: Point) -> usize {
		if !origin.x.is_finite() || !origin.y.is_finite() {
			return 0;
		}
		let colors = palette(kind, self.dark);
		let presets = &self.config.presets;
		match kind {
			Kind::Ripple => {
				self.ripples.push(Ripple::new(origin, &presets.ripple, colors));
				1
			}
			Kind::Splash => {
				let count = uniform_count(
					&mut self.rng,
					presets.splash.count_min,
					presets.splash.count_max,
				);
				let room = self.config.max_particles.saturating_sub(self.particles.len());
				let count = count.min(room);
				for _ in 0..count {
					let p = Particle::splash(origin, &presets.splash, colors, &mut self.rng);
					self.particles.push(p);
				}
				count
			}
			Kind::Trail | Kind::Glyph => {
				if self.particles.len() >= self.config.max_particles {
					return 0;
				}
				let p = if kind == Kind::Trail {
					Particle::trail(origin, &presets.trail, colors, &mut self.rng)
				} else {
					let ch = self.glyph_chars[self.rng.gen_range(0..self.glyph_chars.len())];
					Particle::glyph(origin, ch, &presets.glyph, colors, &mut self.rng)
				};
				self.particles.push(p);
				1
			}
		}
	}

	/// Stops at the first refused spawn, so an oversized `count` costs nothing
	/// once the cap is reached.
	pub(super) fn spawn_many(&mut self, kind: Kind, origin: Point, count: usize) -> usize {
		(0..count)
			.map(|_| self.spawn(kind, origin))
			.take_while(|&n| n > 0)
			.sum()
	}

	pub(super) fn is_full(&self) -> bool {
		self.particles.len() >= self.config.max_particles
	}

	pub(super) fn queue_ripple(&mut self, center: Point, due_ms: f64) {
		self.pending_ripples.push(PendingRipple { due_ms, center });
	}

	pub(super) fn random_count(&mut self, min: usize, max: usize) -> usize {
		uniform_count(&mut self.rng, min, max)
	}

	/// Advance the whole field by one frame.
	///
	/// Ripples grow and expire, queued ripples whose time has come start at
	/// radius 0, particles advance and are culled in one pass, landed glyphs
	/// splash, and the ambient spawner tops up the letter rain.
	pub fn tick(&mut self, now_ms: f64) {
		self.frame += 1;

		for ripple in &mut self.ripples {
			ripple.advance();
		}
		self.ripples.retain(Ripple::is_alive);
		self.release_due_ripples(now_ms);

		let bounds = self.bounds;
		let (rng, chars) = (&mut self.rng, &self.glyph_chars);
		let mut landings = Vec::new();
		self.particles.retain_mut(|p| {
			let events = p.advance(bounds);
			if events.reroll {
				if let Some(glyph) = &mut p.glyph {
					glyph.ch = chars[rng.gen_range(0..chars.len())];
				}
			}
			if events.landed {
				landings.push(Point::new(p.x, bounds.height));
			}
			p.is_alive(bounds)
		});

		for at in landings {
			self.spawn(Kind::Splash, at);
		}

		if self.config.rain {
			self.spawn_ambient();
		}
	}

	fn release_due_ripples(&mut self, now_ms: f64) {
		let mut due = Vec::new();
		self.pending_ripples.retain(|pending| {
			let ready = now_ms >= pending.due_ms;
			if ready {
				due.push(pending.center);
			}
			!ready
		});
		for center in due {
			self.spawn(Kind::Ripple, center);
		}
	}

	fn spawn_ambient(&mut self) {
		let glyph = &self.config.presets.glyph;
		let (every, batch, font_size, spawn_height) = (
			glyph.spawn_every.max(1),
			glyph.batch,
			glyph.font_size,
			glyph.spawn_height,
		);
		let columns = self.columns();
		if columns == 0 || self.frame % every != 0 || self.glyph_count() >= self.density_target() {
			return;
		}
		for _ in 0..batch {
			let column = self.rng.gen_range(0..columns);
			let y = -uniform(&mut self.rng, 0.0, spawn_height);
			if self.spawn(Kind::Glyph, Point::new(column as f64 * font_size, y)) == 0 {
				break;
			}
		}
	}
}
