//! Tunable presets for each particle kind and the page-level configuration.
//!
//! The numbers here were tuned by eye rather than derived, so every one of
//! them is configurable. The page can override any subset through a JSON
//! `<script id="particle-config">` element; missing fields keep their defaults.

use serde::Deserialize;

use super::error::FieldError;
use super::theme::{Color, RAIN_FADE};

/// Cursor/touch trail particles.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct TrailPreset {
	/// Velocity components are uniform in `[-speed, speed]` px/frame.
	pub speed: f64,
	pub size_min: f64,
	pub size_max: f64,
	pub decay_min: f64,
	pub decay_max: f64,
	/// Particles spawned per pointer-move event.
	pub per_move: usize,
	/// Particles spawned on touch start.
	pub touch_burst: usize,
	pub glow_blur: f64,
}

impl Default for TrailPreset {
	fn default() -> Self {
		Self {
			speed: 1.0,
			size_min: 2.0,
			size_max: 6.0,
			decay_min: 0.008,
			decay_max: 0.023,
			per_move: 2,
			touch_burst: 4,
			glow_blur: 20.0,
		}
	}
}

/// Falling glyphs of the letter rain.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct GlyphPreset {
	/// Glyph characters; an empty string falls back to the default set.
	pub charset: String,
	/// Monospace font size, also the column width.
	pub font_size: f64,
	pub speed_min: f64,
	pub speed_max: f64,
	pub alpha_min: f64,
	pub alpha_max: f64,
	/// A glyph swaps its character every N frames, N in `[reroll_min, reroll_max)`.
	pub reroll_min: u32,
	pub reroll_max: u32,
	/// Distance past the bottom edge at which a glyph is culled.
	pub bottom_margin: f64,
	/// Target live glyph count as a multiple of the column count.
	pub density: f64,
	/// Ambient spawning runs on every Nth frame.
	pub spawn_every: u64,
	pub batch: usize,
	/// New glyphs start up to this far above the top edge.
	pub spawn_height: f64,
	pub glow_blur: f64,
}

pub const DEFAULT_CHARSET: &str =
	"01アイウエオカキクケコサシスセソタチツテト0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ@#$%^&*";

impl Default for GlyphPreset {
	fn default() -> Self {
		Self {
			charset: DEFAULT_CHARSET.to_string(),
			font_size: 14.0,
			speed_min: 1.5,
			speed_max: 3.5,
			alpha_min: 0.15,
			alpha_max: 0.4,
			reroll_min: 10,
			reroll_max: 30,
			bottom_margin: 100.0,
			density: 1.5,
			spawn_every: 2,
			batch: 5,
			spawn_height: 200.0,
			glow_blur: 10.0,
		}
	}
}

/// Splash burst emitted when a glyph lands on the bottom edge.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct SplashPreset {
	/// Inclusive burst size range.
	pub count_min: usize,
	pub count_max: usize,
	/// Horizontal velocity is uniform in `[-spread, spread]`.
	pub spread: f64,
	/// Upward launch speed range.
	pub lift_min: f64,
	pub lift_max: f64,
	pub gravity: f64,
	pub friction: f64,
	pub decay_min: f64,
	pub decay_max: f64,
	pub size_min: f64,
	pub size_max: f64,
	/// Culling margin around all four edges.
	pub margin: f64,
	pub glow_blur: f64,
}

impl Default for SplashPreset {
	fn default() -> Self {
		Self {
			count_min: 3,
			count_max: 8,
			spread: 2.0,
			lift_min: 2.0,
			lift_max: 8.0,
			gravity: 0.3,
			friction: 0.98,
			decay_min: 0.015,
			decay_max: 0.025,
			size_min: 1.0,
			size_max: 3.0,
			margin: 100.0,
			glow_blur: 8.0,
		}
	}
}

/// Click feedback rings.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct RipplePreset {
	/// Radius increment per frame.
	pub growth: f64,
	pub max_radius: f64,
	/// Stroke width at radius 0.
	pub max_width: f64,
	/// Stroke width at `max_radius`.
	pub min_width: f64,
	/// Delay before the echo ring.
	pub echo_delay_ms: f64,
	/// Inner ring radius as a fraction of the outer one.
	pub inner_scale: f64,
	pub glow_blur: f64,
}

impl Default for RipplePreset {
	fn default() -> Self {
		Self {
			growth: 3.0,
			max_radius: 150.0,
			max_width: 3.0,
			min_width: 1.0,
			echo_delay_ms: 100.0,
			inner_scale: 0.7,
			glow_blur: 15.0,
		}
	}
}

/// Numeric presets for every kind.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Presets {
	pub trail: TrailPreset,
	pub glyph: GlyphPreset,
	pub splash: SplashPreset,
	pub ripple: RipplePreset,
}

/// Input disambiguation and touch interpolation.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct InputConfig {
	/// Pointer moves within this window after a touch event are ignored.
	pub touch_suppress_ms: f64,
	/// Touch segments shorter than this spawn at the end point only.
	pub touch_min_segment: f64,
	/// Segment length covered by one interpolation step.
	pub touch_step: f64,
	pub touch_max_steps: usize,
	pub touch_per_step_min: usize,
	pub touch_per_step_max: usize,
}

impl Default for InputConfig {
	fn default() -> Self {
		Self {
			touch_suppress_ms: 500.0,
			touch_min_segment: 5.0,
			touch_step: 10.0,
			touch_max_steps: 10,
			touch_per_step_min: 2,
			touch_per_step_max: 3,
		}
	}
}

/// How each frame starts.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ClearMode {
	/// Wipe the surface for crisp edges.
	Clear,
	/// Lay a translucent fill over the last frame, leaving an afterimage.
	Fade(Color),
}

/// Behavior of a single mounted field.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldConfig {
	/// Pointer and touch input spawn trail particles.
	pub trail: bool,
	/// Clicks spawn ripples.
	pub ripples: bool,
	/// Ambient falling glyphs with landing splashes.
	pub rain: bool,
	/// Draw the glow/ring/dot pointer indicator.
	pub show_cursor: bool,
	pub clear: ClearMode,
	/// Upper bound on live point particles.
	pub max_particles: usize,
	pub presets: Presets,
	pub input: InputConfig,
}

pub const DEFAULT_MAX_PARTICLES: usize = 2000;

impl FieldConfig {
	fn base(presets: Presets, input: InputConfig) -> Self {
		Self {
			trail: false,
			ripples: false,
			rain: false,
			show_cursor: false,
			clear: ClearMode::Clear,
			max_particles: DEFAULT_MAX_PARTICLES,
			presets,
			input,
		}
	}

	/// Pointer trail with the cursor indicator.
	pub fn cursor_trail(presets: Presets, input: InputConfig) -> Self {
		Self {
			trail: true,
			show_cursor: true,
			..Self::base(presets, input)
		}
	}

	/// Double-ring click feedback.
	pub fn ripples(presets: Presets, input: InputConfig) -> Self {
		Self {
			ripples: true,
			..Self::base(presets, input)
		}
	}

	/// Ambient letter rain drawn with an afterimage fade.
	pub fn letter_rain(presets: Presets, input: InputConfig) -> Self {
		Self {
			rain: true,
			clear: ClearMode::Fade(RAIN_FADE),
			..Self::base(presets, input)
		}
	}
}

/// Page-level configuration read from the DOM.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct PageConfig {
	pub cursor_trail: bool,
	pub ripples: bool,
	pub letter_rain: bool,
	pub max_particles: usize,
	pub presets: Presets,
	pub input: InputConfig,
}

impl Default for PageConfig {
	fn default() -> Self {
		Self {
			cursor_trail: true,
			ripples: true,
			letter_rain: true,
			max_particles: DEFAULT_MAX_PARTICLES,
			presets: Presets::default(),
			input: InputConfig::default(),
		}
	}
}

impl PageConfig {
	pub fn from_json(text: &str) -> Result<Self, FieldError> {
		Ok(serde_json::from_str(text)?)
	}

	/// Field configurations for the enabled layers, bottom to top.
	pub fn layers(&self) -> Vec<FieldConfig> {
		let build = |make: fn(Presets, InputConfig) -> FieldConfig| FieldConfig {
			max_particles: self.max_particles,
			..make(self.presets.clone(), self.input.clone())
		};
		let mut layers = Vec::with_capacity(3);
		if self.letter_rain {
			layers.push(build(FieldConfig::letter_rain));
		}
		if self.ripples {
			layers.push(build(FieldConfig::ripples));
		}
		if self.cursor_trail {
			layers.push(build(FieldConfig::cursor_trail));
		}
		layers
	}
}
