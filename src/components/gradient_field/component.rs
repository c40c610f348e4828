//! Leptos component wrapping the gradient canvas.
//!
//! The component creates a full-window canvas plus a blurred glass overlay,
//! tracks the cursor, and runs the animation loop via
//! `requestAnimationFrame`, advancing and drawing the field each frame.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::{error, info};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, Window};

use super::config::Settings;
use super::render::CanvasSurface;
use super::state::GradientState;

/// Bundles the simulation state with the surface it draws on.
struct GradientContext {
	state: GradientState,
	surface: CanvasSurface,
	/// Last background color written to the page body.
	background: String,
}

fn window_size(window: &Window) -> (f64, f64) {
	let w = window
		.inner_width()
		.ok()
		.and_then(|v| v.as_f64())
		.unwrap_or(800.0);
	let h = window
		.inner_height()
		.ok()
		.and_then(|v| v.as_f64())
		.unwrap_or(600.0);
	(w, h)
}

/// Paint the page body behind the canvas.
fn set_body_background(color: &str) {
	if let Some(body) = web_sys::window()
		.and_then(|w| w.document())
		.and_then(|d| d.body())
	{
		let _ = body.style().set_property("background-color", color);
	}
}

/// Forward every `mousemove` on the document to `on_move` as
/// `(client_x, client_y, seconds)`. The listener stays registered while the
/// returned closure is alive.
pub fn listen_mouse_moves(
	mut on_move: impl FnMut(f64, f64, f64) + 'static,
) -> Option<Closure<dyn FnMut(MouseEvent)>> {
	let document = web_sys::window()?.document()?;
	let cb = Closure::<dyn FnMut(MouseEvent)>::new(move |ev: MouseEvent| {
		on_move(
			ev.client_x() as f64,
			ev.client_y() as f64,
			ev.time_stamp() / 1000.0,
		);
	});
	document
		.add_event_listener_with_callback("mousemove", cb.as_ref().unchecked_ref())
		.ok()?;
	Some(cb)
}

/// Renders the animated gradient on a full-window canvas.
///
/// `settings` seeds the parameters and palette. The returned state handle is
/// shared with the animation loop, so callers holding it (control panels)
/// see and change the same state the next frame reads.
#[component]
pub fn GradientCanvas(
	settings: Settings,
	#[prop(optional)] handle: Option<Rc<RefCell<Option<GradientStateHandle>>>>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let context: Rc<RefCell<Option<GradientContext>>> = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let mousemove_cb: Rc<RefCell<Option<Closure<dyn FnMut(MouseEvent)>>>> =
		Rc::new(RefCell::new(None));
	let (context_init, animate_init, resize_cb_init, mousemove_cb_init) = (
		context.clone(),
		animate.clone(),
		resize_cb.clone(),
		mousemove_cb.clone(),
	);

	let blur = RwSignal::new(settings.config.blur);

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			return;
		};

		let (w, h) = window_size(&window);
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let ctx: CanvasRenderingContext2d = match canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|c| c.dyn_into().ok())
		{
			Some(ctx) => ctx,
			None => {
				error!("gradient-field: 2d canvas context unavailable");
				return;
			}
		};

		let seed = js_sys::Date::now() as u64;
		let state = GradientState::new(&settings, w, h, seed);
		let background = state.background_css();
		set_body_background(&background);
		info!(
			"gradient-field: {} points on {}x{} canvas",
			state.field().len(),
			w,
			h
		);

		*context_init.borrow_mut() = Some(GradientContext {
			state,
			surface: CanvasSurface::new(canvas.clone(), ctx),
			background,
		});
		if let Some(ref handle) = handle {
			*handle.borrow_mut() = Some(GradientStateHandle {
				context: context_init.clone(),
			});
		}

		let (context_resize, canvas_resize) = (context_init.clone(), canvas.clone());
		*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
			let Some(win) = web_sys::window() else {
				return;
			};
			let (nw, nh) = window_size(&win);
			canvas_resize.set_width(nw as u32);
			canvas_resize.set_height(nh as u32);
			if let Some(ref mut c) = *context_resize.borrow_mut() {
				c.state.resize(nw, nh);
			}
		}));
		if let Some(ref cb) = *resize_cb_init.borrow() {
			let _ = window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		}

		// Tracked on the document, not the canvas.
		let (context_mm, canvas_mm) = (context_init.clone(), canvas.clone());
		*mousemove_cb_init.borrow_mut() = listen_mouse_moves(move |client_x, client_y, now| {
			let rect = canvas_mm.get_bounding_client_rect();
			if let Some(ref mut c) = *context_mm.borrow_mut() {
				c.state
					.record_mouse_move(client_x - rect.left(), client_y - rect.top(), now);
			}
		});

		let (context_anim, animate_inner) = (context_init.clone(), animate_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move |timestamp_ms: f64| {
			if let Some(ref mut c) = *context_anim.borrow_mut() {
				c.state.frame(&mut c.surface, timestamp_ms / 1000.0);

				let background = c.state.background_css();
				if background != c.background {
					set_body_background(&background);
					c.background = background;
				}
				if blur.get_untracked() != c.state.config().blur {
					blur.set(c.state.config().blur);
				}
			}
			if let Some(ref cb) = *animate_inner.borrow() {
				if let Some(win) = web_sys::window() {
					let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
				}
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let glass_style = move || {
		let px = blur.get();
		format!(
			"position: fixed; inset: 0; pointer-events: none; \
			 backdrop-filter: blur({px}px); -webkit-backdrop-filter: blur({px}px);"
		)
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="gradient-canvas"
			style="display: block; position: fixed; inset: 0;"
		/>
		<div class="glass-effect" style=glass_style />
	}
}

/// Shared access to the running state for control surfaces.
#[derive(Clone)]
pub struct GradientStateHandle {
	context: Rc<RefCell<Option<GradientContext>>>,
}

impl GradientStateHandle {
	/// Run `f` against the live state. Returns `None` before the canvas has
	/// been set up.
	pub fn with<R>(&self, f: impl FnOnce(&mut GradientState) -> R) -> Option<R> {
		self.context
			.borrow_mut()
			.as_mut()
			.map(|c| f(&mut c.state))
	}
}
