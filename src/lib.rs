//! ambient-sky: decorative canvas effects for a portfolio page.
//!
//! This crate provides a WASM-based star-field background and a glowing
//! particle emitter, each animated on its own canvas with theme-derived colors,
//! pixel-ratio aware sizing and reduced-motion support.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;

pub use components::ambient::{AmbientConfig, ParticlesCanvas, StarfieldCanvas};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("ambient: logging initialized");
}

/// Load effect configuration from a script element with id="ambient-config".
/// Falls back to defaults when the element is missing or malformed.
fn load_config() -> AmbientConfig {
	let Some(json_text) = config_text() else {
		return AmbientConfig::default();
	};

	match AmbientConfig::from_json(&json_text) {
		Ok(config) => {
			info!("ambient: loaded config (seed: {:?})", config.seed);
			config
		}
		Err(e) => {
			warn!("ambient: {}, using defaults", e);
			AmbientConfig::default()
		}
	}
}

fn config_text() -> Option<String> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("ambient-config")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	script.text().ok()
}

/// Host page shell.
/// Provides the effect configuration and places both ambient surfaces.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();
	provide_context(load_config());

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />
		<Title text="Portfolio" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<StarfieldCanvas />
		<main class="site-content">
			<section class="hero">
				<div class="hero__particles">
					<ParticlesCanvas />
				</div>
			</section>
		</main>
	}
}
