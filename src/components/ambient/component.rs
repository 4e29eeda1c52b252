//! Leptos components wrapping the two ambient canvases.
//!
//! Each component mounts its surface from an `Effect` once the canvas exists
//! and tears it down from `on_cleanup`. Mount failures are logged and leave the
//! canvas blank.

use leptos::prelude::*;
use send_wrapper::SendWrapper;
use log::{info, warn};
use web_sys::HtmlCanvasElement;

use super::config::AmbientConfig;
use super::mount::{MountOptions, Sizing, mount, prefers_reduced_motion};
use super::particles::ParticleSystem;
use super::starfield::StarField;
use super::theme::Palette;

fn seed(config: &AmbientConfig) -> u64 {
	config
		.seed
		.unwrap_or_else(|| (js_sys::Math::random() * u64::MAX as f64) as u64)
}

/// Mounts the scene built by `build` on `canvas` and arranges for teardown.
fn mount_surface<S, F>(canvas: HtmlCanvasElement, config: &AmbientConfig, sizing: Sizing, name: &str, build: F)
where
	S: super::state::Scene + 'static,
	F: FnOnce(Palette, u64) -> S,
{
	let Some(window) = web_sys::window() else {
		warn!("ambient: {} not mounted: no window", name);
		return;
	};

	let palette = Palette::from_document(&window);
	let reduced_motion = config.respect_reduced_motion && prefers_reduced_motion(&window);
	let options = MountOptions {
		sizing,
		max_pixel_ratio: config.surface.max_pixel_ratio,
		reduced_motion,
	};

	match mount(canvas, build(palette, seed(config)), options) {
		Ok(teardown) => {
			info!("ambient: {} mounted (reduced motion: {})", name, reduced_motion);
			// JS closures are not Send; the cleanup only ever runs on this thread.
			let teardown = SendWrapper::new(teardown);
			on_cleanup(move || teardown.take().run());
		}
		Err(e) => warn!("ambient: {} not mounted: {}", name, e),
	}
}

/// Full-viewport twinkling star-field, meant to sit behind the page content.
#[component]
pub fn StarfieldCanvas() -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let config = use_context::<AmbientConfig>().unwrap_or_default();

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let star_config = config.starfield.clone();
		mount_surface(canvas, &config, Sizing::Viewport, "starfield", |palette, seed| {
			StarField::new(star_config, palette, seed)
		});
	});

	view! {
		<div class="site-animated-bg" aria-hidden="true">
			<canvas node_ref=canvas_ref class="site-animated-bg__canvas" />
		</div>
	}
}

/// Glowing particle emitter that fills its parent element.
#[component]
pub fn ParticlesCanvas() -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let config = use_context::<AmbientConfig>().unwrap_or_default();

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let particle_config = config.particles.clone();
		mount_surface(canvas, &config, Sizing::Container, "particles", |palette, seed| {
			ParticleSystem::new(particle_config, palette, seed)
		});
	});

	view! {
		<canvas
			node_ref=canvas_ref
			class="particles-canvas"
			aria-hidden="true"
			style="display: block; width: 100%; height: 100%;"
		/>
	}
}
