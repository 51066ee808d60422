//! Leptos component wrapping the network graph canvas.
//!
//! Creates an HTML canvas, wires mouse/wheel events into the interaction
//! controller, and runs a `requestAnimationFrame` loop that ticks the
//! simulation and presents the frame. Everything registered at window level
//! is owned by a [`Subscription`] whose `destroy` is idempotent and invoked
//! from leptos cleanup, so unmounting leaks neither listeners nor the
//! animation loop.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent, Window};

use super::config::GraphConfig;
use super::controller::InteractionController;
use super::render::CanvasBridge;
use super::types::GraphData;

/// Owns deregistration for everything a mounted graph wires up: window
/// listeners and the animation loop.
#[derive(Default)]
pub struct Subscription {
	cleanups: Vec<Box<dyn FnOnce()>>,
}

impl Subscription {
	/// An empty subscription with nothing to tear down yet.
	pub fn new() -> Self {
		Self::default()
	}

	/// Register a cleanup to run on destroy.
	pub fn defer(&mut self, cleanup: impl FnOnce() + 'static) {
		self.cleanups.push(Box::new(cleanup));
	}

	/// Run and drop all registered cleanups. Calling again is a no-op.
	pub fn destroy(&mut self) {
		for cleanup in self.cleanups.drain(..) {
			cleanup();
		}
	}
}

/// An in-progress background pan.
struct PanGesture {
	last_x: f64,
	last_y: f64,
}

struct GraphContext {
	controller: InteractionController<CanvasBridge>,
	pan: Option<PanGesture>,
}

fn event_position(canvas: &HtmlCanvasElement, ev: &MouseEvent) -> (f64, f64) {
	let rect = canvas.get_bounding_client_rect();
	(
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	)
}

/// Renders an interactive force-directed network graph on a canvas element.
///
/// Pass graph data via the reactive `data` signal. The component sizes
/// itself from the config unless `fullscreen = true`, in which case it fills
/// the viewport and follows window resizes.
#[component]
pub fn NetworkGraphCanvas(
	#[prop(into)] data: Signal<GraphData>,
	#[prop(optional)] config: Option<GraphConfig>,
	#[prop(default = false)] fullscreen: bool,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let context: Rc<RefCell<Option<GraphContext>>> = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let subscription: Rc<RefCell<Subscription>> = Rc::new(RefCell::new(Subscription::new()));
	let base_config = config.unwrap_or_default();

	let (context_init, animate_init, subscription_init) =
		(context.clone(), animate.clone(), subscription.clone());
	let config_init = base_config.clone();
	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let window: Window = web_sys::window().unwrap();

		let mut config = config_init.clone();
		if fullscreen {
			config.width = window.inner_width().unwrap().as_f64().unwrap();
			config.height = window.inner_height().unwrap().as_f64().unwrap();
		}
		canvas.set_width(config.width as u32);
		canvas.set_height(config.height as u32);

		let ctx: CanvasRenderingContext2d = canvas
			.get_context("2d")
			.unwrap()
			.unwrap()
			.dyn_into()
			.unwrap();

		let bridge = CanvasBridge::new(&config);
		let controller = match InteractionController::new(&data.get(), config, bridge) {
			Ok(controller) => controller,
			Err(e) => {
				log::error!("network-graph: rejected graph data: {e}");
				return;
			}
		};
		*context_init.borrow_mut() = Some(GraphContext { controller, pan: None });

		if fullscreen {
			let (context_resize, canvas_resize) = (context_init.clone(), canvas.clone());
			let resize_cb: Closure<dyn FnMut()> = Closure::new(move || {
				let win: Window = web_sys::window().unwrap();
				let (nw, nh) = (
					win.inner_width().unwrap().as_f64().unwrap(),
					win.inner_height().unwrap().as_f64().unwrap(),
				);
				canvas_resize.set_width(nw as u32);
				canvas_resize.set_height(nh as u32);
				if let Some(ref mut c) = *context_resize.borrow_mut() {
					c.controller.bridge_mut().resize(nw, nh);
				}
			});
			let _ = window
				.add_event_listener_with_callback("resize", resize_cb.as_ref().unchecked_ref());
			let window_cleanup = window.clone();
			subscription_init.borrow_mut().defer(move || {
				let _ = window_cleanup.remove_event_listener_with_callback(
					"resize",
					resize_cb.as_ref().unchecked_ref(),
				);
			});
		}

		let alive = Rc::new(Cell::new(true));
		let alive_cleanup = alive.clone();
		subscription_init.borrow_mut().defer(move || alive_cleanup.set(false));

		let (context_anim, animate_inner) = (context_init.clone(), animate_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if !alive.get() {
				return;
			}
			let dt = 0.016;
			if let Some(ref mut c) = *context_anim.borrow_mut() {
				c.controller.tick();
				c.controller.bridge_mut().present(&ctx, dt);
			}
			if let Some(ref cb) = *animate_inner.borrow() {
				let _ = web_sys::window()
					.unwrap()
					.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let subscription_cleanup = send_wrapper::SendWrapper::new(subscription.clone());
	on_cleanup(move || subscription_cleanup.borrow_mut().destroy());

	let context_md = context.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
		let (x, y) = event_position(&canvas, &ev);
		if let Some(ref mut c) = *context_md.borrow_mut() {
			match c.controller.node_at(x, y) {
				Some(index) => c.controller.drag_start(index, x, y),
				None => c.pan = Some(PanGesture { last_x: x, last_y: y }),
			}
		}
	};

	let context_mm = context.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
		let (x, y) = event_position(&canvas, &ev);
		if let Some(ref mut c) = *context_mm.borrow_mut() {
			if c.controller.dragging().is_some() {
				c.controller.drag_move(x, y);
			} else if let Some(ref mut pan) = c.pan {
				let (dx, dy) = (x - pan.last_x, y - pan.last_y);
				pan.last_x = x;
				pan.last_y = y;
				c.controller.pan_by(dx, dy);
			} else {
				let hovered = c.controller.node_at(x, y);
				c.controller.hover(hovered);
			}
		}
	};

	let context_mu = context.clone();
	let on_mouseup = move |_: MouseEvent| {
		if let Some(ref mut c) = *context_mu.borrow_mut() {
			c.controller.drag_end();
			c.pan = None;
		}
	};

	let context_ml = context.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut c) = *context_ml.borrow_mut() {
			c.controller.drag_end();
			c.pan = None;
			c.controller.hover(None);
		}
	};

	let context_wh = context.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
		let rect = canvas.get_bounding_client_rect();
		let (x, y) = (
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		);
		if let Some(ref mut c) = *context_wh.borrow_mut() {
			let factor = if ev.delta_y() > 0.0 { 0.9 } else { 1.1 };
			c.controller.zoom_by(factor, (x, y));
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="network-graph-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:wheel=on_wheel
			style="display: block; cursor: grab;"
		/>
	}
}

#[cfg(test)]
mod tests {
	use std::cell::Cell;
	use std::rc::Rc;

	use super::Subscription;

	#[test]
	fn destroy_runs_cleanups_once() {
		let counter = Rc::new(Cell::new(0));
		let mut subscription = Subscription::new();
		for _ in 0..3 {
			let counter = counter.clone();
			subscription.defer(move || counter.set(counter.get() + 1));
		}

		subscription.destroy();
		assert_eq!(counter.get(), 3);

		// Double-destroy is a no-op, not an error.
		subscription.destroy();
		assert_eq!(counter.get(), 3);
	}

	#[test]
	fn destroy_on_empty_subscription_is_a_no_op() {
		Subscription::new().destroy();
	}
}
