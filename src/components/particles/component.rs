//! Leptos component wrapping one particle overlay canvas.
//!
//! The component creates a fixed, full-viewport canvas and, once it is in the
//! DOM, builds a [`ParticleField`], attaches window listeners for the inputs
//! its configuration uses, and starts a `requestAnimationFrame` loop that
//! ticks and renders the field. Everything is torn down in `on_cleanup`.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::{info, warn};
use send_wrapper::SendWrapper;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Event, HtmlCanvasElement, MouseEvent, TouchEvent, Window};

use super::config::FieldConfig;
use super::error::FieldError;
use super::field::ParticleField;
use super::listeners::ListenerSet;
use super::particle::Point;
use super::render;
use super::scheduler::FrameLoop;

/// Live resources of a mounted overlay.
struct Mounted {
	frame_loop: FrameLoop,
	listeners: ListenerSet,
	field: Rc<RefCell<ParticleField>>,
}

impl Mounted {
	fn teardown(mut self) {
		let was_running = self.frame_loop.is_running();
		self.frame_loop.stop();
		self.listeners.detach_all();
		self.field.borrow_mut().clear();
		info!("particle overlay unmounted (loop running: {})", was_running);
	}
}

fn viewport_size(window: &Window) -> (f64, f64) {
	let dim = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
	(dim(window.inner_width()), dim(window.inner_height()))
}

fn now_ms() -> f64 {
	js_sys::Date::now()
}

/// Event coordinates relative to the canvas.
fn canvas_point(canvas: &HtmlCanvasElement, client_x: i32, client_y: i32) -> Point {
	let rect = canvas.get_bounding_client_rect();
	Point::new(client_x as f64 - rect.left(), client_y as f64 - rect.top())
}

fn first_touch(canvas: &HtmlCanvasElement, ev: &Event) -> Option<Point> {
	let touch = ev.dyn_ref::<TouchEvent>()?.touches().get(0)?;
	Some(canvas_point(canvas, touch.client_x(), touch.client_y()))
}

fn mouse_point(canvas: &HtmlCanvasElement, ev: &Event) -> Option<Point> {
	let ev = ev.dyn_ref::<MouseEvent>()?;
	Some(canvas_point(canvas, ev.client_x(), ev.client_y()))
}

fn mount(
	canvas: HtmlCanvasElement,
	config: FieldConfig,
	dark: Signal<bool>,
) -> Result<Mounted, FieldError> {
	let window: Window = web_sys::window().ok_or(FieldError::Host("window"))?;
	let (w, h) = viewport_size(&window);
	canvas.set_width(w as u32);
	canvas.set_height(h as u32);

	let mut ctx: CanvasRenderingContext2d = canvas
		.get_context("2d")
		.ok()
		.flatten()
		.and_then(|c| c.dyn_into().ok())
		.ok_or(FieldError::Host("2d context"))?;

	let seed = (js_sys::Math::random() * u64::MAX as f64) as u64;
	let field = Rc::new(RefCell::new(ParticleField::new(config.clone(), w, h, seed)));
	field.borrow_mut().set_dark(dark.try_get_untracked().unwrap_or(false));

	let mut listeners = ListenerSet::new(window.clone().into());

	let (field_resize, canvas_resize) = (field.clone(), canvas.clone());
	listeners.listen("resize", move |_| {
		let Some(win) = web_sys::window() else {
			return;
		};
		let (nw, nh) = viewport_size(&win);
		canvas_resize.set_width(nw as u32);
		canvas_resize.set_height(nh as u32);
		field_resize.borrow_mut().resize(nw, nh);
	})?;

	if config.trail {
		let (field_mm, canvas_mm) = (field.clone(), canvas.clone());
		listeners.listen("mousemove", move |ev| {
			if let Some(at) = mouse_point(&canvas_mm, &ev) {
				field_mm.borrow_mut().pointer_move(at, now_ms());
			}
		})?;

		let (field_ts, canvas_ts) = (field.clone(), canvas.clone());
		listeners.listen("touchstart", move |ev| {
			if let Some(at) = first_touch(&canvas_ts, &ev) {
				field_ts.borrow_mut().touch_start(at, now_ms());
			}
		})?;

		let (field_tm, canvas_tm) = (field.clone(), canvas.clone());
		listeners.listen("touchmove", move |ev| {
			if let Some(at) = first_touch(&canvas_tm, &ev) {
				field_tm.borrow_mut().touch_move(at, now_ms());
			}
		})?;

		let field_te = field.clone();
		listeners.listen("touchend", move |_| {
			field_te.borrow_mut().touch_end(now_ms());
		})?;
	}

	if config.ripples {
		let (field_cl, canvas_cl) = (field.clone(), canvas.clone());
		listeners.listen("click", move |ev| {
			if let Some(at) = mouse_point(&canvas_cl, &ev) {
				field_cl.borrow_mut().click(at, now_ms());
			}
		})?;
	}

	let field_anim = field.clone();
	let frame_loop = FrameLoop::start(move || {
		let mut field = field_anim.borrow_mut();
		if field.theme_due() {
			if let Some(is_dark) = dark.try_get_untracked() {
				field.set_dark(is_dark);
			}
		}
		field.tick(now_ms());
		render::render(&field, &mut ctx)
	})?;

	info!(
		"particle overlay mounted at {}x{} with {} listeners",
		w,
		h,
		listeners.len()
	);

	Ok(Mounted {
		frame_loop,
		listeners,
		field,
	})
}

/// Renders one particle effect layer as a fixed, full-viewport overlay.
///
/// `config` selects the behaviors (trail, ripples, rain) and presets. `dark`
/// is read every few frames to pick palettes for newly spawned particles; the
/// component never writes it. The overlay ignores pointer events so the page
/// underneath stays interactive.
#[component]
pub fn ParticleFieldCanvas(
	config: FieldConfig,
	#[prop(into)] dark: Signal<bool>,
	#[prop(default = 0)] z_index: i32,
	#[prop(default = 1.0)] opacity: f64,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let mounted: Rc<RefCell<Option<Mounted>>> = Rc::new(RefCell::new(None));
	let mounted_init = mounted.clone();

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		if mounted_init.borrow().is_some() {
			return;
		}
		match mount(canvas.into(), config.clone(), dark) {
			Ok(m) => *mounted_init.borrow_mut() = Some(m),
			Err(e) => warn!("particle overlay not started: {}", e),
		}
	});

	let teardown = SendWrapper::new(mounted);
	on_cleanup(move || {
		if let Some(m) = teardown.borrow_mut().take() {
			m.teardown();
		}
	});

	let style = format!(
		"position: fixed; top: 0; left: 0; width: 100%; height: 100%; \
		 pointer-events: none; z-index: {}; opacity: {};",
		z_index, opacity
	);

	view! {
		<canvas
			node_ref=canvas_ref
			class="particle-field-canvas"
			style=style
		/>
	}
}
