//! Drawing primitives for the ambient surfaces.
//!
//! Scenes paint through the [`Painter`] trait rather than the canvas directly,
//! so paint order and parameters can be checked without a browser. The canvas
//! implementation works in logical pixels; the pixel-ratio transform is
//! installed by the mount code.

use std::f64::consts::TAU;

use web_sys::{CanvasGradient, CanvasRenderingContext2d};

use super::theme::Color;

/// Compositing mode for subsequent fills.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Blend {
	/// Paint over what is already there.
	Normal,
	/// Add channel values, so overlapping glows brighten.
	Additive,
}

impl Blend {
	fn composite_op(self) -> &'static str {
		match self {
			Blend::Normal => "source-over",
			Blend::Additive => "lighter",
		}
	}
}

/// A color stop in a radial gradient.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GradientStop {
	/// Position along the radius, 0 at the centre and 1 at the edge.
	pub offset: f64,
	pub color: Color,
	pub alpha: f64,
}

impl GradientStop {
	pub const fn new(offset: f64, color: Color, alpha: f64) -> Self {
		Self {
			offset,
			color,
			alpha,
		}
	}
}

/// Minimal 2d drawing surface used by the scenes.
pub trait Painter {
	/// Clears the logical rectangle `(0, 0, width, height)`.
	fn clear(&mut self, width: f64, height: f64);

	fn set_blend(&mut self, blend: Blend);

	/// Fills a disc of `radius` around `(x, y)` with a radial gradient from the
	/// centre outwards.
	fn gradient_disc(&mut self, x: f64, y: f64, radius: f64, stops: &[GradientStop]);

	/// Fills the whole `(0, 0, width, height)` rectangle with a radial gradient
	/// centred on `(cx, cy)`.
	#[allow(clippy::too_many_arguments)]
	fn gradient_wash(
		&mut self,
		width: f64,
		height: f64,
		cx: f64,
		cy: f64,
		radius: f64,
		stops: &[GradientStop],
	);

	/// Fills a solid disc.
	fn disc(&mut self, x: f64, y: f64, radius: f64, color: Color, alpha: f64);

	/// Fills a solid disc with a blurred glow of `glow_alpha` around it.
	#[allow(clippy::too_many_arguments)]
	fn glow_disc(
		&mut self,
		x: f64,
		y: f64,
		radius: f64,
		color: Color,
		alpha: f64,
		blur: f64,
		glow_alpha: f64,
	);
}

fn radial_gradient(
	ctx: &CanvasRenderingContext2d,
	cx: f64,
	cy: f64,
	radius: f64,
	stops: &[GradientStop],
) -> Option<CanvasGradient> {
	let gradient = ctx.create_radial_gradient(cx, cy, 0.0, cx, cy, radius).ok()?;
	for stop in stops {
		gradient
			.add_color_stop(stop.offset as f32, &stop.color.to_css(stop.alpha))
			.ok()?;
	}
	Some(gradient)
}

impl Painter for CanvasRenderingContext2d {
	fn clear(&mut self, width: f64, height: f64) {
		self.clear_rect(0.0, 0.0, width, height);
	}

	fn set_blend(&mut self, blend: Blend) {
		let _ = self.set_global_composite_operation(blend.composite_op());
	}

	fn gradient_disc(&mut self, x: f64, y: f64, radius: f64, stops: &[GradientStop]) {
		let Some(gradient) = radial_gradient(self, x, y, radius, stops) else {
			return;
		};
		#[allow(deprecated)]
		self.set_fill_style(&gradient);
		self.begin_path();
		let _ = self.arc(x, y, radius, 0.0, TAU);
		self.fill();
	}

	fn gradient_wash(
		&mut self,
		width: f64,
		height: f64,
		cx: f64,
		cy: f64,
		radius: f64,
		stops: &[GradientStop],
	) {
		let Some(gradient) = radial_gradient(self, cx, cy, radius, stops) else {
			return;
		};
		#[allow(deprecated)]
		self.set_fill_style(&gradient);
		self.fill_rect(0.0, 0.0, width, height);
	}

	fn disc(&mut self, x: f64, y: f64, radius: f64, color: Color, alpha: f64) {
		self.set_fill_style_str(&color.to_css(alpha));
		self.begin_path();
		let _ = self.arc(x, y, radius, 0.0, TAU);
		self.fill();
	}

	fn glow_disc(
		&mut self,
		x: f64,
		y: f64,
		radius: f64,
		color: Color,
		alpha: f64,
		blur: f64,
		glow_alpha: f64,
	) {
		self.set_shadow_blur(blur);
		self.set_shadow_color(&color.to_css(glow_alpha));
		self.disc(x, y, radius, color, alpha);
		self.set_shadow_blur(0.0);
	}
}

#[cfg(test)]
pub(crate) mod recorder {
	//! A [`Painter`] that records calls instead of drawing.

	use super::*;

	#[derive(Clone, Debug, PartialEq)]
	pub enum Op {
		Clear(f64, f64),
		Blend(Blend),
		GradientDisc {
			x: f64,
			y: f64,
			radius: f64,
			stops: Vec<GradientStop>,
		},
		Wash {
			cx: f64,
			cy: f64,
			radius: f64,
			stops: Vec<GradientStop>,
		},
		Disc {
			x: f64,
			y: f64,
			radius: f64,
			color: Color,
			alpha: f64,
		},
		GlowDisc {
			radius: f64,
			color: Color,
			alpha: f64,
			blur: f64,
		},
	}

	#[derive(Default)]
	pub struct Recorder {
		pub ops: Vec<Op>,
	}

	impl Recorder {
		pub fn count(&self, pred: impl Fn(&Op) -> bool) -> usize {
			self.ops.iter().filter(|op| pred(op)).count()
		}
	}

	impl Painter for Recorder {
		fn clear(&mut self, width: f64, height: f64) {
			self.ops.push(Op::Clear(width, height));
		}

		fn set_blend(&mut self, blend: Blend) {
			self.ops.push(Op::Blend(blend));
		}

		fn gradient_disc(&mut self, x: f64, y: f64, radius: f64, stops: &[GradientStop]) {
			self.ops.push(Op::GradientDisc {
				x,
				y,
				radius,
				stops: stops.to_vec(),
			});
		}

		fn gradient_wash(
			&mut self,
			_width: f64,
			_height: f64,
			cx: f64,
			cy: f64,
			radius: f64,
			stops: &[GradientStop],
		) {
			self.ops.push(Op::Wash {
				cx,
				cy,
				radius,
				stops: stops.to_vec(),
			});
		}

		fn disc(&mut self, x: f64, y: f64, radius: f64, color: Color, alpha: f64) {
			self.ops.push(Op::Disc {
				x,
				y,
				radius,
				color,
				alpha,
			});
		}

		fn glow_disc(
			&mut self,
			_x: f64,
			_y: f64,
			radius: f64,
			color: Color,
			alpha: f64,
			blur: f64,
			_glow_alpha: f64,
		) {
			self.ops.push(Op::GlowDisc {
				radius,
				color,
				alpha,
				blur,
			});
		}
	}
}
