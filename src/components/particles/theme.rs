//! Theme-aware color policy for the particle overlays.
//!
//! Physics and timing never look at the theme; only the colors chosen at
//! construction time (and the cursor indicator) depend on it.

use super::particle::Kind;

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	pub a: f64,
}

impl Color {
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	/// Replace the alpha channel, clamped to `[0, 1]`.
	pub fn with_alpha(self, a: f64) -> Self {
		Self {
			a: a.clamp(0.0, 1.0),
			..self
		}
	}

	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

const GOLD: Color = Color::rgb(255, 215, 0);
const DARK_GOLD: Color = Color::rgb(212, 175, 55);
const PINK: Color = Color::rgb(255, 182, 193);
const VIOLET: Color = Color::rgb(155, 136, 218);
const AMBER: Color = Color::rgb(255, 193, 102);
const GOLDEN: Color = Color::rgb(240, 180, 80);

const TRAIL_DARK: [Color; 3] = [GOLD, PINK, VIOLET];
const TRAIL_LIGHT: [Color; 3] = [GOLD, AMBER, GOLDEN];

const GLYPH_DARK: [Color; 4] = [GOLD, DARK_GOLD, VIOLET, PINK];
const GLYPH_LIGHT: [Color; 4] = [
	Color::rgb(184, 134, 11), // Dark goldenrod
	DARK_GOLD,
	Color::rgb(120, 100, 190), // Deep violet
	Color::rgb(200, 120, 140), // Rose
];

const SPLASH_DARK: [Color; 3] = [GOLD, PINK, Color::rgb(255, 240, 200)];
const SPLASH_LIGHT: [Color; 3] = [AMBER, GOLDEN, DARK_GOLD];

// Outer ring first, inner ring second.
const RIPPLE_DARK: [Color; 3] = [GOLD, PINK, VIOLET];
const RIPPLE_LIGHT: [Color; 3] = [GOLD, AMBER, GOLDEN];

/// Fallback for an empty palette slice.
pub const WHITE: Color = Color::rgb(255, 255, 255);

/// Afterimage fill laid over the previous frame by the letter-rain layer.
pub const RAIN_FADE: Color = Color::rgba(15, 15, 35, 0.15);

/// Returns the palette a particle of `kind` draws its color from.
pub fn palette(kind: Kind, dark: bool) -> &'static [Color] {
	match (kind, dark) {
		(Kind::Trail, true) => &TRAIL_DARK,
		(Kind::Trail, false) => &TRAIL_LIGHT,
		(Kind::Glyph, true) => &GLYPH_DARK,
		(Kind::Glyph, false) => &GLYPH_LIGHT,
		(Kind::Splash, true) => &SPLASH_DARK,
		(Kind::Splash, false) => &SPLASH_LIGHT,
		(Kind::Ripple, true) => &RIPPLE_DARK,
		(Kind::Ripple, false) => &RIPPLE_LIGHT,
	}
}

/// Colors of the pointer indicator drawn over the trail.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CursorColors {
	/// Outer glow and ring.
	pub ring: Color,
	/// Center dot.
	pub dot: Color,
}

pub fn cursor_colors(dark: bool) -> CursorColors {
	CursorColors {
		ring: GOLD,
		dot: if dark {
			Color::rgb(250, 250, 250)
		} else {
			Color::rgb(220, 180, 80)
		},
	}
}
