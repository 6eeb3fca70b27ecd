//! particle-field: Canvas particle overlays for a portfolio landing page.
//!
//! This crate provides a WASM-based set of full-viewport canvas layers (letter
//! rain, click ripples, cursor trail) driven by a small particle engine.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use send_wrapper::SendWrapper;
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, MediaQueryList, Window};

pub mod components;

pub use components::particles::{
	FieldConfig, InputConfig, PageConfig, ParticleField, ParticleFieldCanvas, Presets,
};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("particle-field: logging initialized");
}

/// Load overlay configuration from a script element with id="particle-config".
/// Missing element or invalid JSON falls back to the stock page.
fn load_page_config() -> PageConfig {
	let Some(json_text) = config_script_text() else {
		return PageConfig::default();
	};

	match PageConfig::from_json(&json_text) {
		Ok(config) => {
			info!(
				"particle-field: loaded config (trail: {}, ripples: {}, rain: {})",
				config.cursor_trail, config.ripples, config.letter_rain
			);
			config
		}
		Err(e) => {
			warn!("particle-field: {}, using defaults", e);
			PageConfig::default()
		}
	}
}

fn config_script_text() -> Option<String> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("particle-config")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	script.text().ok()
}

/// Dark mode as the page presents it: a `dark` class on `<html>`, a
/// `dark-theme` class on `<body>`, or else the system preference.
pub fn document_is_dark() -> bool {
	is_dark_with(color_scheme_query().as_ref())
}

fn color_scheme_query() -> Option<MediaQueryList> {
	web_sys::window()?
		.match_media("(prefers-color-scheme: dark)")
		.ok()
		.flatten()
}

fn is_dark_with(scheme: Option<&MediaQueryList>) -> bool {
	if let Some(document) = web_sys::window().and_then(|w| w.document()) {
		let html_dark = document
			.document_element()
			.is_some_and(|el| el.class_list().contains("dark"));
		let body_dark = document
			.body()
			.is_some_and(|body| body.class_list().contains("dark-theme"));
		if html_dark || body_dark {
			return true;
		}
	}
	scheme.is_some_and(|mq| mq.matches())
}

/// Main application component.
/// Loads overlay configuration from the DOM and mounts one canvas per enabled layer.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let page = load_page_config();
	let scheme = SendWrapper::new(color_scheme_query());
	let dark = Signal::derive(move || is_dark_with((*scheme).as_ref()));
	let layer_style = |config: &FieldConfig| -> (i32, f64) {
		if config.rain {
			(0, 0.5)
		} else if config.ripples {
			(40, 1.0)
		} else {
			(10000, 1.0)
		}
	};

	let layers = page
		.layers()
		.into_iter()
		.map(|config| {
			let (z_index, opacity) = layer_style(&config);
			view! { <ParticleFieldCanvas config=config dark=dark z_index=z_index opacity=opacity /> }
		})
		.collect_view();

	view! {
		<Html attr:lang="en" attr:dir="ltr" />
		<Title text="Particle Field" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div class="particle-layers">{layers}</div>
	}
}
