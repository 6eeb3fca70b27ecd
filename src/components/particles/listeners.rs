//! Event listeners that are detached together on teardown.

use wasm_bindgen::prelude::*;
use web_sys::{Event, EventTarget};

use super::error::FieldError;

/// Listeners registered on one target.
pub struct ListenerSet {
	target: EventTarget,
	bound: Vec<(&'static str, Closure<dyn FnMut(Event)>)>,
}

impl ListenerSet {
	pub fn new(target: EventTarget) -> Self {
		Self {
			target,
			bound: Vec::new(),
		}
	}

	pub fn listen(
		&mut self,
		event: &'static str,
		handler: impl FnMut(Event) + 'static,
	) -> Result<(), FieldError> {
		let closure = Closure::<dyn FnMut(Event)>::new(handler);
		self.target
			.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
			.map_err(|e| FieldError::surface("add_event_listener", e))?;
		self.bound.push((event, closure));
		Ok(())
	}

	pub fn len(&self) -> usize {
		self.bound.len()
	}

	pub fn detach_all(&mut self) {
		for (event, closure) in self.bound.drain(..) {
			let _ = self
				.target
				.remove_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
		}
	}
}

impl Drop for ListenerSet {
	fn drop(&mut self) {
		self.detach_all();
	}
}
