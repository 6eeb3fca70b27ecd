//! Canvas particle overlays.
//!
//! A small particle engine driven by pointer, touch, and click input plus an
//! ambient spawner, rendered once per display refresh:
//! - Cursor trail with a glow/ring/dot pointer indicator
//! - Double-ring click ripples
//! - Letter rain whose glyphs splash when they reach the bottom edge
//!
//! The engine (`field`, `particle`, `ripple`, `input`, `render`) only talks to
//! a [`Surface`] and takes timestamps as arguments, so it runs without a
//! browser. `component`, `scheduler`, and `listeners` bind it to the DOM.
//!
//! # Example
//!
//! ```ignore
//! use particle_field::{FieldConfig, InputConfig, ParticleFieldCanvas, Presets};
//!
//! let config = FieldConfig::cursor_trail(Presets::default(), InputConfig::default());
//! view! { <ParticleFieldCanvas config=config dark=Signal::stored(true) z_index=10000 /> }
//! ```

mod component;
pub mod config;
mod error;
mod field;
mod input;
mod listeners;
pub mod particle;
mod render;
pub mod ripple;
mod scheduler;
mod surface;
pub mod theme;

pub use component::ParticleFieldCanvas;
pub use config::{ClearMode, FieldConfig, InputConfig, PageConfig, Presets};
pub use error::FieldError;
pub use field::ParticleField;
pub use input::{interpolation_steps, PointerState};
pub use particle::{Bounds, Kind, Particle, Point};
pub use render::render;
pub use ripple::Ripple;
pub use surface::Surface;
pub use theme::{palette, Color};
