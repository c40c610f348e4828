//! gradient-field: mouse-reactive particle gradient for the browser.
//!
//! This crate provides a WASM canvas component that renders a drifting field
//! of colored discs, reacts to the cursor, and can be configured and shared
//! through URL query parameters.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, UrlSearchParams, Window};

pub mod components;

pub use components::gradient_field::{
	GradientCanvas, GradientState, GradientStateHandle, Palette, Settings, SimulationConfig,
	embed_code,
};

/// Control strip pinned above the canvas and the glass overlay.
const CONTROLS_STYLE: &str = "position: fixed; top: 1rem; left: 1rem; z-index: 1; \
	display: flex; gap: 0.5rem; align-items: flex-start;";

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("gradient-field: logging initialized");
}

/// Read the optional settings block from a script element with
/// id="gradient-settings".
fn load_page_settings(window: &Window) -> Option<Settings> {
	let document = window.document()?;
	let element = document.get_element_by_id("gradient-settings")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	let json_text = script.text().ok()?;

	match Settings::from_json(&json_text) {
		Ok(settings) => {
			info!("gradient-field: loaded page settings");
			Some(settings)
		}
		Err(e) => {
			warn!("gradient-field: failed to parse page settings: {}", e);
			None
		}
	}
}

/// Defaults, then the page settings block, then the URL query string.
pub fn load_settings() -> Settings {
	let Some(window) = web_sys::window() else {
		return Settings::default();
	};
	let mut settings = load_page_settings(&window).unwrap_or_default();

	if let Some(query) = window
		.location()
		.search()
		.ok()
		.and_then(|search| UrlSearchParams::new_with_str(&search).ok())
	{
		settings.apply_query(&query);
	}
	settings
}

/// Address of the current page without its query string.
pub fn current_base_url() -> Option<String> {
	let location = web_sys::window()?.location();
	Some(format!(
		"{}{}",
		location.origin().ok()?,
		location.pathname().ok()?
	))
}

/// Encode query pairs onto `base`.
pub fn share_url(base: &str, pairs: &[(String, String)]) -> Option<String> {
	let params = UrlSearchParams::new().ok()?;
	for (key, value) in pairs {
		params.append(key, value);
	}
	Some(format!("{}?{}", base, String::from(params.to_string())))
}

/// Tag the body so host pages can style the embedded view.
fn set_embed_mode() {
	if let Some(body) = web_sys::window()
		.and_then(|w| w.document())
		.and_then(|d| d.body())
	{
		let _ = body.class_list().add_1("embed-mode");
	}
}

/// Run `f` against the live state once the canvas is up.
fn with_state(
	handle: &Rc<RefCell<Option<GradientStateHandle>>>,
	f: impl FnOnce(&mut GradientState),
) {
	if let Some(ref h) = *handle.borrow() {
		h.with(f);
	}
}

/// Main application component.
/// Loads settings from the page and URL and renders the gradient.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let settings = load_settings();
	let embed = settings.embed;
	if embed {
		set_embed_mode();
	}

	let handle: Rc<RefCell<Option<GradientStateHandle>>> = Rc::new(RefCell::new(None));
	let embed_output = RwSignal::new(String::new());

	let (handle_random, handle_reset, handle_share) = (handle.clone(), handle.clone(), handle.clone());
	let controls = (!embed).then(move || {
		view! {
			<div class="controls" style=CONTROLS_STYLE>
				<button on:click=move |_| {
					with_state(&handle_random, |state| state.randomize_palette())
				}>"Randomize colors"</button>
				<button on:click=move |_| {
					with_state(&handle_reset, |state| state.reset_defaults())
				}>"Reset"</button>
				<button on:click=move |_| {
					with_state(&handle_share, |state| {
						let url = current_base_url()
							.and_then(|base| share_url(&base, &state.share_pairs(false)));
						if let Some(url) = url {
							embed_output.set(embed_code(&url));
						}
					})
				}>"Embed code"</button>
				<textarea readonly=true prop:value=move || embed_output.get() />
			</div>
		}
	});

	view! {
		<Html attr:lang="en" attr:dir="ltr" />
		<Title text="Gradient Field" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<GradientCanvas settings=settings handle=handle />
		{controls}
	}
}
