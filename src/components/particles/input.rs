//! Input binding: pointer, touch, and click events to spawn calls.
//!
//! Platforms that emit emulated mouse events after a touch would double the
//! trail, so pointer moves shortly after any touch event are ignored. Touch
//! sampling is coarser than mouse sampling, so fast swipes are interpolated.

use super::field::ParticleField;
use super::particle::{Kind, Point};

/// Pointer bookkeeping for one field.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PointerState {
	cursor: Option<Point>,
	last_touch_ms: Option<f64>,
	previous_touch: Option<Point>,
}

impl PointerState {
	pub fn cursor(&self) -> Option<Point> {
		self.cursor
	}

	/// Whether a pointer event at `now_ms` falls inside the post-touch window.
	pub fn suppresses_pointer(&self, now_ms: f64, window_ms: f64) -> bool {
		matches!(self.last_touch_ms, Some(t) if now_ms - t <= window_ms)
	}
}

/// Interpolation sub-steps for a touch segment of `distance` px.
pub fn interpolation_steps(distance: f64, step: f64, max_steps: usize) -> usize {
	let max_steps = max_steps.max(1);
	if step <= 0.0 || !distance.is_finite() {
		return max_steps;
	}
	((distance / step).floor() as usize).clamp(1, max_steps)
}

impl ParticleField {
	/// Mouse/pointer move. Returns the number of trail particles spawned.
	pub fn pointer_move(&mut self, at: Point, now_ms: f64) -> usize {
		if !self.config().trail || !at.is_valid_input() {
			return 0;
		}
		if self
			.pointer
			.suppresses_pointer(now_ms, self.config().input.touch_suppress_ms)
		{
			return 0;
		}
		self.pointer.cursor = Some(at);
		let count = self.config().presets.trail.per_move;
		self.spawn_many(Kind::Trail, at, count)
	}

	/// Touch start: an initial burst at the touch point.
	pub fn touch_start(&mut self, at: Point, now_ms: f64) -> usize {
		if !self.config().trail || !at.is_valid_input() {
			return 0;
		}
		self.pointer.last_touch_ms = Some(now_ms);
		self.pointer.cursor = Some(at);
		self.pointer.previous_touch = Some(at);
		let count = self.config().presets.trail.touch_burst;
		self.spawn_many(Kind::Trail, at, count)
	}

	/// Touch move: fills the segment from the previous touch point with
	/// evenly spaced spawns, more for longer segments.
	pub fn touch_move(&mut self, at: Point, now_ms: f64) -> usize {
		if !self.config().trail || !at.is_valid_input() {
			return 0;
		}
		self.pointer.last_touch_ms = Some(now_ms);
		self.pointer.cursor = Some(at);
		let Some(previous) = self.pointer.previous_touch.replace(at) else {
			return 0;
		};

		let input = self.config().input.clone();
		let distance = previous.distance(at);
		if distance < input.touch_min_segment {
			let count = self.config().presets.trail.per_move;
			return self.spawn_many(Kind::Trail, at, count);
		}

		let steps = interpolation_steps(distance, input.touch_step, input.touch_max_steps);
		let mut spawned = 0;
		for i in 1..=steps {
			if self.is_full() {
				break;
			}
			let point = previous.lerp(at, i as f64 / steps as f64);
			let count = self.random_count(input.touch_per_step_min, input.touch_per_step_max);
			spawned += self.spawn_many(Kind::Trail, point, count);
		}
		spawned
	}

	/// Touch end: hides the cursor; spawned particles keep decaying.
	pub fn touch_end(&mut self, now_ms: f64) {
		self.pointer.last_touch_ms = Some(now_ms);
		self.pointer.cursor = None;
		self.pointer.previous_touch = None;
	}

	/// Click: one ripple now and an echo after the configured delay.
	pub fn click(&mut self, at: Point, now_ms: f64) -> usize {
		if !self.config().ripples || !at.is_valid_input() {
			return 0;
		}
		let delay = self.config().presets.ripple.echo_delay_ms;
		self.queue_ripple(at, now_ms + delay);
		self.spawn(Kind::Ripple, at)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::particles::config::{FieldConfig, InputConfig, Presets};

	fn field() -> ParticleField {
		let config = FieldConfig {
			ripples: true,
			..FieldConfig::cursor_trail(Presets::default(), InputConfig::default())
		};
		ParticleField::new(config, 1024.0, 768.0, 42)
	}

	#[test]
	fn pointer_move_spawns_two_and_tracks_cursor() {
		let mut f = field();
		assert_eq!(f.pointer_move(Point::new(10.0, 20.0), 0.0), 2);
		assert_eq!(f.cursor(), Some(Point::new(10.0, 20.0)));
		assert_eq!(f.particles().len(), 2);
	}

	#[test]
	fn synthetic_pointer_move_after_touch_is_ignored() {
		let mut f = field();
		f.touch_start(Point::new(50.0, 50.0), 1000.0);
		f.touch_end(1000.0);
		let before = f.particles().len();
		assert_eq!(f.pointer_move(Point::new(60.0, 60.0), 1499.0), 0);
		assert_eq!(f.pointer_move(Point::new(60.0, 60.0), 1500.0), 0);
		assert_eq!(f.particles().len(), before);
		assert_eq!(f.cursor(), None);
		assert_eq!(f.pointer_move(Point::new(60.0, 60.0), 1501.0), 2);
	}

	#[test]
	fn touch_start_bursts_four() {
		let mut f = field();
		assert_eq!(f.touch_start(Point::new(5.0, 5.0), 0.0), 4);
		assert_eq!(f.cursor(), Some(Point::new(5.0, 5.0)));
	}

	#[test]
	fn touch_move_without_previous_point_spawns_nothing() {
		let mut f = field();
		assert_eq!(f.touch_move(Point::new(0.0, 0.0), 0.0), 0);
		assert!(f.particles().is_empty());
	}

	#[test]
	fn long_touch_segment_is_interpolated() {
		let mut f = field();
		f.touch_move(Point::new(0.0, 0.0), 0.0);
		let spawned = f.touch_move(Point::new(100.0, 0.0), 16.0);
		assert!((20..=30).contains(&spawned), "spawned {spawned}");

		let mut xs: Vec<f64> = f.particles().iter().map(|p| p.x).collect();
		xs.dedup();
		let expected: Vec<f64> = (1..=10).map(|i| i as f64 * 10.0).collect();
		assert_eq!(xs, expected);
	}

	#[test]
	fn short_touch_segment_spawns_at_end_point() {
		let mut f = field();
		f.touch_start(Point::new(10.0, 10.0), 0.0);
		let spawned = f.touch_move(Point::new(12.0, 10.0), 16.0);
		assert_eq!(spawned, 2);
		assert!(f.particles()[4..].iter().all(|p| p.x == 12.0));
	}

	#[test]
	fn step_count_scales_with_distance() {
		assert_eq!(interpolation_steps(5.0, 10.0, 10), 1);
		assert_eq!(interpolation_steps(35.0, 10.0, 10), 3);
		assert_eq!(interpolation_steps(100.0, 10.0, 10), 10);
		assert_eq!(interpolation_steps(900.0, 10.0, 10), 10);
		assert_eq!(interpolation_steps(50.0, 0.0, 10), 10);
	}

	#[test]
	fn touch_end_clears_cursor_but_not_particles() {
		let mut f = field();
		f.touch_start(Point::new(5.0, 5.0), 0.0);
		f.touch_end(10.0);
		assert_eq!(f.cursor(), None);
		assert_eq!(f.particles().len(), 4);
		assert_eq!(f.touch_move(Point::new(90.0, 90.0), 20.0), 0);
	}

	#[test]
	fn click_yields_two_ripples_a_hundred_ms_apart() {
		let mut f = field();
		let at = Point::new(100.0, 100.0);
		assert_eq!(f.click(at, 0.0), 1);
		assert_eq!(f.ripples().len(), 1);
		assert_eq!(f.ripples()[0].radius, 0.0);
		assert_eq!(f.ripples()[0].max_radius, 150.0);

		f.tick(50.0);
		assert_eq!(f.ripples().len(), 1);
		f.tick(100.0);
		assert_eq!(f.ripples().len(), 2);
		let echo = &f.ripples()[1];
		assert_eq!(echo.center, at);
		assert_eq!(echo.radius, 0.0);
		assert_eq!(echo.max_radius, 150.0);
		assert!(f.ripples().iter().all(|r| r.center == at));
	}

	#[test]
	fn malformed_coordinates_are_dropped() {
		let mut f = field();
		assert_eq!(f.pointer_move(Point::new(f64::NAN, 1.0), 0.0), 0);
		assert_eq!(f.touch_start(Point::new(-3.0, 1.0), 0.0), 0);
		assert_eq!(f.click(Point::new(1.0, f64::INFINITY), 0.0), 0);
		assert!(f.particles().is_empty() && f.ripples().is_empty());
		assert_eq!(f.cursor(), None);
		f.tick(500.0);
		assert!(f.ripples().is_empty());
	}

	#[test]
	fn disabled_effects_ignore_input() {
		let config = FieldConfig::letter_rain(Presets::default(), InputConfig::default());
		let mut f = ParticleField::new(config, 100.0, 100.0, 1);
		assert_eq!(f.pointer_move(Point::new(1.0, 1.0), 0.0), 0);
		assert_eq!(f.click(Point::new(1.0, 1.0), 0.0), 0);
	}
}
