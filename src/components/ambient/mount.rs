//! Browser side of a mounted surface.
//!
//! [`mount`] sizes the canvas, attaches a passive resize listener and drives a
//! [`FrameLoop`] from `requestAnimationFrame`. The returned [`Teardown`] removes
//! the listener and cancels the pending frame.

use std::cell::RefCell;
use std::rc::Rc;

use log::warn;
use wasm_bindgen::prelude::*;
use web_sys::{AddEventListenerOptions, CanvasRenderingContext2d, HtmlCanvasElement, Window};

use super::error::MountError;
use super::scale::SurfaceSize;
use super::state::{FrameLoop, FrameRequest, Scene};

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// Which box a surface is sized to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sizing {
	/// The window's inner size. The canvas CSS size is pinned to it.
	Viewport,
	/// The canvas's own client size, as laid out by CSS.
	Container,
}

/// Per-mount options.
#[derive(Clone, Copy, Debug)]
pub struct MountOptions {
	pub sizing: Sizing,
	pub max_pixel_ratio: f64,
	pub reduced_motion: bool,
}

/// Undoes a [`mount`]. Runs at most once.
pub struct Teardown(Box<dyn FnOnce()>);

impl Teardown {
	pub fn run(self) {
		(self.0)()
	}
}

/// Whether the user has asked the platform for reduced motion.
pub fn prefers_reduced_motion(window: &Window) -> bool {
	window
		.match_media("(prefers-reduced-motion: reduce)")
		.ok()
		.flatten()
		.is_some_and(|mq| mq.matches())
}

fn measure(window: &Window, canvas: &HtmlCanvasElement, options: &MountOptions) -> SurfaceSize {
	let (w, h) = match options.sizing {
		Sizing::Viewport => (
			window
				.inner_width()
				.ok()
				.and_then(|v| v.as_f64())
				.unwrap_or(0.0),
			window
				.inner_height()
				.ok()
				.and_then(|v| v.as_f64())
				.unwrap_or(0.0),
		),
		Sizing::Container => (canvas.client_width() as f64, canvas.client_height() as f64),
	};
	SurfaceSize::new(w, h, window.device_pixel_ratio(), options.max_pixel_ratio)
}

/// Sets the backing store size and re-installs the pixel-ratio transform,
/// which the resize itself resets.
fn apply_size(
	canvas: &HtmlCanvasElement,
	ctx: &CanvasRenderingContext2d,
	size: &SurfaceSize,
	sizing: Sizing,
) {
	canvas.set_width(size.backing_width());
	canvas.set_height(size.backing_height());
	if sizing == Sizing::Viewport {
		let style = canvas.style();
		let _ = style.set_property("width", &format!("{}px", size.width));
		let _ = style.set_property("height", &format!("{}px", size.height));
	}
	let r = size.pixel_ratio;
	let _ = ctx.set_transform(r, 0.0, 0.0, r, 0.0, 0.0);
}

fn request_frame<S: Scene>(frame_loop: &Rc<RefCell<FrameLoop<S>>>, animate: &FrameCallback) {
	let Some(window) = web_sys::window() else {
		return;
	};
	if let Some(ref cb) = *animate.borrow() {
		match window.request_animation_frame(cb.as_ref().unchecked_ref()) {
			Ok(handle) => frame_loop.borrow_mut().frame_scheduled(handle),
			Err(e) => warn!("ambient: requestAnimationFrame failed: {:?}", e),
		}
	}
}

/// Mounts `scene` on `canvas` and starts animating it.
pub fn mount<S: Scene + 'static>(
	canvas: HtmlCanvasElement,
	scene: S,
	options: MountOptions,
) -> Result<Teardown, MountError> {
	let window = web_sys::window().ok_or(MountError::NoWindow)?;
	let ctx: CanvasRenderingContext2d = canvas
		.get_context("2d")
		.ok()
		.flatten()
		.and_then(|c| c.dyn_into().ok())
		.ok_or(MountError::NoContext)?;

	let size = measure(&window, &canvas, &options);
	apply_size(&canvas, &ctx, &size, options.sizing);

	let frame_loop = Rc::new(RefCell::new(FrameLoop::new(scene, options.reduced_motion)));
	let animate: FrameCallback = Rc::new(RefCell::new(None));

	let (loop_resize, animate_resize, canvas_resize, ctx_resize) =
		(frame_loop.clone(), animate.clone(), canvas.clone(), ctx.clone());
	let on_resize: Closure<dyn FnMut()> = Closure::new(move || {
		let Some(win) = web_sys::window() else {
			return;
		};
		let size = measure(&win, &canvas_resize, &options);
		apply_size(&canvas_resize, &ctx_resize, &size, options.sizing);
		let request = loop_resize.borrow_mut().resize(size.width, size.height);
		if request == FrameRequest::Next {
			request_frame(&loop_resize, &animate_resize);
		}
	});

	let listener_options = AddEventListenerOptions::new();
	listener_options.set_passive(true);
	window
		.add_event_listener_with_callback_and_add_event_listener_options(
			"resize",
			on_resize.as_ref().unchecked_ref(),
			&listener_options,
		)
		.map_err(|_| MountError::Listener)?;

	// Filled only once nothing else can fail: the frame closure holds a handle
	// to its own slot, and only the teardown breaks that cycle.
	let (loop_anim, animate_inner, mut ctx_anim) = (frame_loop.clone(), animate.clone(), ctx.clone());
	*animate.borrow_mut() = Some(Closure::new(move |now: f64| {
		let request = loop_anim.borrow_mut().frame(now, &mut ctx_anim);
		if request == FrameRequest::Next {
			request_frame(&loop_anim, &animate_inner);
		}
	}));

	let now = window.performance().map(|p| p.now()).unwrap_or(0.0);
	let mut ctx_mount = ctx;
	let request = frame_loop
		.borrow_mut()
		.mount(size.width, size.height, now, &mut ctx_mount);
	if request == FrameRequest::Next {
		request_frame(&frame_loop, &animate);
	}

	Ok(Teardown(Box::new(move || {
		let _ = window
			.remove_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref());
		if let Some(handle) = frame_loop.borrow_mut().teardown() {
			let _ = window.cancel_animation_frame(handle);
		}
		// The frame closure holds a handle to its own slot.
		animate.borrow_mut().take();
		drop(on_resize);
	})))
}
