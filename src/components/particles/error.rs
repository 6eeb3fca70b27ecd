//! Error type shared by the particle engine and its browser host.

use thiserror::Error;
use wasm_bindgen::JsValue;

/// Failures surfaced by drawing, configuration, or host setup.
///
/// None of these are fatal to the page: the frame loop logs a failed pass and
/// keeps scheduling, and a host failure simply leaves the effect unmounted.
#[derive(Debug, Error)]
pub enum FieldError {
	/// A canvas call rejected its arguments.
	#[error("drawing surface rejected `{op}`: {message}")]
	Surface { op: &'static str, message: String },

	/// The page configuration JSON could not be parsed.
	#[error("invalid particle configuration: {0}")]
	Config(#[from] serde_json::Error),

	/// A browser object the effect depends on is unavailable.
	#[error("host unavailable: {0}")]
	Host(&'static str),
}

impl FieldError {
	/// Wraps a rejected JS call, keeping the operation name for the log line.
	pub fn surface(op: &'static str, value: JsValue) -> Self {
		let message = value
			.as_string()
			.unwrap_or_else(|| format!("{:?}", value));
		Self::Surface { op, message }
	}
}
