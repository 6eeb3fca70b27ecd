//! `requestAnimationFrame` driver with a cancellable handle.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use log::{debug, warn};
use wasm_bindgen::prelude::*;

use super::error::FieldError;

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Runs a frame callback once per display refresh until stopped.
///
/// A failed frame is logged and the next one is still scheduled; only
/// [`FrameLoop::stop`] ends the loop.
pub struct FrameLoop {
	callback: FrameCallback,
	handle: Rc<Cell<Option<i32>>>,
}

impl FrameLoop {
	pub fn start(mut frame: impl FnMut() -> Result<(), FieldError> + 'static) -> Result<Self, FieldError> {
		let window = web_sys::window().ok_or(FieldError::Host("window"))?;
		let callback: FrameCallback = Rc::new(RefCell::new(None));
		let handle = Rc::new(Cell::new(None));
		let (callback_inner, handle_inner) = (callback.clone(), handle.clone());
		let mut failures: u64 = 0;

		*callback.borrow_mut() = Some(Closure::new(move || {
			handle_inner.set(None);
			if let Err(e) = frame() {
				failures += 1;
				if failures == 1 {
					warn!("particle frame failed, continuing: {}", e);
				} else {
					debug!("particle frame failed ({} so far): {}", failures, e);
				}
			}
			if let Some(ref cb) = *callback_inner.borrow() {
				if let Some(win) = web_sys::window() {
					handle_inner.set(win.request_animation_frame(cb.as_ref().unchecked_ref()).ok());
				}
			}
		}));

		if let Some(ref cb) = *callback.borrow() {
			let id = window
				.request_animation_frame(cb.as_ref().unchecked_ref())
				.map_err(|e| FieldError::surface("request_animation_frame", e))?;
			handle.set(Some(id));
		}

		Ok(Self { callback, handle })
	}

	/// Cancel the pending frame and release the callback.
	pub fn stop(&self) {
		if let (Some(id), Some(win)) = (self.handle.take(), web_sys::window()) {
			let _ = win.cancel_animation_frame(id);
		}
		self.callback.borrow_mut().take();
	}

	pub fn is_running(&self) -> bool {
		self.callback.borrow().is_some()
	}
}

impl Drop for FrameLoop {
	fn drop(&mut self) {
		self.stop();
	}
}
