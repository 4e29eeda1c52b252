//! Short-lived glowing particles rising over a soft ambient wash.

use log::debug;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::config::ParticleConfig;
use super::render::{GradientStop, Painter};
use super::state::Scene;
use super::theme::{BACKDROP, Palette, clamp01};

/// A single emitted particle.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
	pub x: f64,
	pub y: f64,
	pub vx: f64,
	pub vy: f64,
	pub size: f64,
	/// Remaining ticks. The particle is dropped once this reaches zero.
	pub life: i32,
}

/// Live particle set with spawn and expiry rules.
pub struct ParticleSystem {
	config: ParticleConfig,
	palette: Palette,
	particles: Vec<Particle>,
	width: f64,
	height: f64,
	rng: SmallRng,
}

impl ParticleSystem {
	pub fn new(config: ParticleConfig, palette: Palette, seed: u64) -> Self {
		Self {
			particles: Vec::with_capacity(config.cap),
			config,
			palette,
			width: 0.0,
			height: 0.0,
			rng: SmallRng::seed_from_u64(seed),
		}
	}

	pub fn particles(&self) -> &[Particle] {
		&self.particles
	}

	/// Draw opacity for a particle: proportional to remaining life.
	pub fn alpha(&self, particle: &Particle) -> f64 {
		let full = self.config.full_life.max(f64::EPSILON);
		clamp01(particle.life as f64 / full) * self.config.max_alpha
	}

	/// Spawns one batch inside the current bounds, truncated so the live count
	/// never exceeds the cap.
	pub fn spawn_batch(&mut self) {
		let room = self.config.cap.saturating_sub(self.particles.len());
		let count = self.config.batch.min(room);
		let (lo, hi) = (
			self.config.life.0.min(self.config.life.1),
			self.config.life.0.max(self.config.life.1),
		);

		for _ in 0..count {
			let rng = &mut self.rng;
			let x = rng.r#gen::<f64>() * self.width;
			let y = rng.r#gen::<f64>() * self.height;
			let vx = (rng.r#gen::<f64>() - 0.5) * self.config.spread_x;
			let vy = (rng.r#gen::<f64>() - 0.5) * self.config.spread_y + self.config.lift;
			let size = self.config.size.0 + rng.r#gen::<f64>() * (self.config.size.1 - self.config.size.0);
			let life = rng.gen_range(lo..=hi).min(i32::MAX as u32) as i32;

			self.particles.push(Particle {
				x,
				y,
				vx,
				vy,
				size,
				life,
			});
		}
	}

	fn in_bounds(&self, p: &Particle) -> bool {
		let m = self.config.bounds_margin;
		p.x >= -m && p.x <= self.width + m && p.y >= -m && p.y <= self.height + m
	}

	/// Moves and ages every particle, dropping expired or escaped ones.
	fn step(&mut self) {
		let mut particles = std::mem::take(&mut self.particles);
		particles.retain_mut(|p| {
			p.x += p.vx;
			p.y += p.vy;
			p.life -= 1;
			p.life > 0 && self.in_bounds(p)
		});
		self.particles = particles;
	}
}

impl Scene for ParticleSystem {
	fn seed(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
		self.spawn_batch();
		debug!("ambient: emitter ready at {}x{}", width, height);
	}

	/// Only the bounds change; live particles are kept.
	fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}

	fn paint<P: Painter>(&self, painter: &mut P, _t: f64) {
		let (w, h) = (self.width, self.height);
		let primary = self.palette.primary();

		painter.clear(w, h);
		painter.gradient_wash(
			w,
			h,
			w * 0.5,
			h * 0.4,
			w.max(h) * 0.8,
			&[
				GradientStop::new(0.0, primary, self.config.wash_alpha),
				GradientStop::new(1.0, BACKDROP, 0.0),
			],
		);

		for p in &self.particles {
			painter.glow_disc(
				p.x,
				p.y,
				p.size,
				primary,
				self.alpha(p),
				self.config.glow_blur,
				self.config.glow_alpha,
			);
		}
	}

	fn advance(&mut self) {
		self.step();
		let chance = clamp01(self.config.spawn_chance);
		if self.particles.len() < self.config.cap && self.rng.gen_bool(chance) {
			self.spawn_batch();
		}
	}
}
