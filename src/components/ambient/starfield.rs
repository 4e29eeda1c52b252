//! Twinkling, drifting star-field.
//!
//! The population size follows the surface area and is fixed between resizes.
//! Every resize throws the old stars away and seeds a fresh set.

use std::f64::consts::TAU;

use log::debug;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::config::StarfieldConfig;
use super::render::{Blend, GradientStop, Painter};
use super::scale::star_population;
use super::state::Scene;
use super::theme::{Palette, clamp01};

/// A single background star.
#[derive(Clone, Debug, PartialEq)]
pub struct Star {
	pub x: f64,
	pub y: f64,
	pub radius: f64,
	pub base_alpha: f64,
	pub twinkle_speed: f64,
	pub twinkle_phase: f64,
	pub drift_x: f64,
	pub drift_y: f64,
	pub color_index: usize,
}

impl Star {
	/// Draw opacity at `t` seconds into the animation, always within [0, 1].
	pub fn frame_alpha(&self, t: f64) -> f64 {
		let twinkle = 0.68 + 0.32 * (t * self.twinkle_speed + self.twinkle_phase).sin();
		clamp01(self.base_alpha * twinkle)
	}

	/// Moves the star by its drift, wrapping to the far side once it is more
	/// than `margin` past an edge.
	fn drift(&mut self, width: f64, height: f64, margin: f64) {
		self.x = wrap(self.x + self.drift_x, width, margin);
		self.y = wrap(self.y + self.drift_y, height, margin);
	}
}

fn wrap(v: f64, extent: f64, margin: f64) -> f64 {
	if v < -margin {
		extent + margin
	} else if v > extent + margin {
		-margin
	} else {
		v
	}
}

fn sample(rng: &mut SmallRng, (min, max): (f64, f64)) -> f64 {
	min + rng.r#gen::<f64>() * (max - min)
}

/// Star population bound to a surface size.
pub struct StarField {
	config: StarfieldConfig,
	palette: Palette,
	stars: Vec<Star>,
	width: f64,
	height: f64,
	rng: SmallRng,
}

impl StarField {
	pub fn new(config: StarfieldConfig, palette: Palette, seed: u64) -> Self {
		Self {
			config,
			palette,
			stars: Vec::new(),
			width: 0.0,
			height: 0.0,
			rng: SmallRng::seed_from_u64(seed),
		}
	}

	pub fn stars(&self) -> &[Star] {
		&self.stars
	}

	/// Replaces the whole population with one sized for `width` x `height`.
	pub fn reseed(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;

		let count = star_population(width, height, &self.config);
		let rng = &mut self.rng;
		let config = &self.config;
		self.stars = (0..count)
			.map(|_| {
				let radius = sample(rng, config.radius);
				let base_alpha = sample(rng, config.base_alpha);
				let twinkle_speed = sample(rng, config.twinkle_speed);
				let twinkle_phase = rng.r#gen::<f64>() * TAU;
				let drift = sample(rng, config.drift);
				let angle = rng.r#gen::<f64>() * TAU;

				Star {
					x: rng.r#gen::<f64>() * width,
					y: rng.r#gen::<f64>() * height,
					radius,
					base_alpha,
					twinkle_speed,
					twinkle_phase,
					drift_x: angle.cos() * drift,
					drift_y: angle.sin() * drift,
					color_index: rng.gen_range(0..Palette::LEN),
				}
			})
			.collect();

		debug!("ambient: seeded {} stars for {}x{}", count, width, height);
	}
}

impl Scene for StarField {
	fn seed(&mut self, width: f64, height: f64) {
		self.reseed(width, height);
	}

	fn resize(&mut self, width: f64, height: f64) {
		self.reseed(width, height);
	}

	fn paint<P: Painter>(&self, painter: &mut P, t: f64) {
		painter.clear(self.width, self.height);
		painter.set_blend(Blend::Additive);

		for star in &self.stars {
			let alpha = star.frame_alpha(t);
			let color = self.palette.get(star.color_index);

			painter.gradient_disc(
				star.x,
				star.y,
				star.radius * self.config.glow_scale,
				&[
					GradientStop::new(0.0, color, alpha * 0.95),
					GradientStop::new(0.3, color, alpha * 0.35),
					GradientStop::new(1.0, color, 0.0),
				],
			);
			painter.disc(star.x, star.y, star.radius, color, alpha);
		}

		painter.set_blend(Blend::Normal);
	}

	fn advance(&mut self) {
		let (w, h, margin) = (self.width, self.height, self.config.wrap_margin);
		for star in &mut self.stars {
			star.drift(w, h, margin);
		}
	}
}
