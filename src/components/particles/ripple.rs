//! Expanding click rings.

use super::config::RipplePreset;
use super::particle::Point;
use super::theme::{Color, WHITE};

/// `value / total`, or 0 when `total` is zero, negative, or not finite.
pub fn ratio(value: f64, total: f64) -> f64 {
	if total > 0.0 && total.is_finite() && value.is_finite() {
		value / total
	} else {
		0.0
	}
}

/// A ring that grows from its center until it reaches `max_radius`.
#[derive(Clone, Debug, PartialEq)]
pub struct Ripple {
	pub center: Point,
	pub radius: f64,
	pub max_radius: f64,
	pub growth: f64,
	pub max_width: f64,
	pub min_width: f64,
	pub inner_scale: f64,
	pub outer: Color,
	pub inner: Color,
}

impl Ripple {
	pub fn new(center: Point, preset: &RipplePreset, palette: &[Color]) -> Self {
		let growth = if preset.growth > 0.0 {
			preset.growth
		} else {
			RipplePreset::default().growth
		};
		let outer = palette.first().copied().unwrap_or(WHITE);
		let inner = palette.get(1).copied().unwrap_or(outer);
		Self {
			center,
			radius: 0.0,
			max_radius: preset.max_radius.max(0.0),
			growth,
			max_width: preset.max_width,
			min_width: preset.min_width,
			inner_scale: preset.inner_scale,
			outer,
			inner,
		}
	}

	pub fn advance(&mut self) {
		self.radius = (self.radius + self.growth).min(self.max_radius);
	}

	/// Fraction of the way to `max_radius`, in `[0, 1]`.
	pub fn progress(&self) -> f64 {
		ratio(self.radius, self.max_radius).clamp(0.0, 1.0)
	}

	pub fn opacity(&self) -> f64 {
		1.0 - self.progress()
	}

	pub fn stroke_width(&self) -> f64 {
		self.max_width - (self.max_width - self.min_width) * self.progress()
	}

	pub fn is_alive(&self) -> bool {
		self.radius < self.max_radius
	}
}
