//! Tunables for the ambient surfaces.
//!
//! Every field has a default, so an empty JSON object (or no config at all)
//! gives the stock look. Ranges are `[min, max]` pairs.

use serde::Deserialize;

use super::error::ConfigError;

/// Backing-store sizing.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct SurfaceConfig {
	/// Upper bound for the device pixel ratio. The lower bound is always 1.
	pub max_pixel_ratio: f64,
}

impl Default for SurfaceConfig {
	fn default() -> Self {
		Self {
			max_pixel_ratio: 2.0,
		}
	}
}

/// Star-field population and look.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct StarfieldConfig {
	/// Surface area (px²) per star.
	pub area_per_star: f64,
	pub min_stars: usize,
	pub max_stars: usize,
	/// Distance beyond an edge at which a star wraps to the other side.
	pub wrap_margin: f64,
	pub radius: (f64, f64),
	pub base_alpha: (f64, f64),
	/// Twinkle angular speed in radians per second.
	pub twinkle_speed: (f64, f64),
	/// Drift speed in px per tick.
	pub drift: (f64, f64),
	/// Glow halo radius as a multiple of the star radius.
	pub glow_scale: f64,
}

impl Default for StarfieldConfig {
	fn default() -> Self {
		Self {
			area_per_star: 14_000.0,
			min_stars: 55,
			max_stars: 160,
			wrap_margin: 20.0,
			radius: (0.6, 2.3),
			base_alpha: (0.25, 0.8),
			twinkle_speed: (0.6, 2.2),
			drift: (0.01, 0.04),
			glow_scale: 10.0,
		}
	}
}

/// Particle emitter population and look.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct ParticleConfig {
	/// Maximum live particles.
	pub cap: usize,
	/// Particles per spawn event.
	pub batch: usize,
	/// Per-frame probability of a spawn event.
	pub spawn_chance: f64,
	/// Padding around the surface beyond which particles are removed.
	pub bounds_margin: f64,
	/// Full width of the horizontal velocity spread, centred on 0.
	pub spread_x: f64,
	/// Full width of the vertical velocity spread.
	pub spread_y: f64,
	/// Constant added to vertical velocity. Negative drifts upward.
	pub lift: f64,
	pub size: (f64, f64),
	/// Initial life in ticks, inclusive.
	pub life: (u32, u32),
	/// Life that maps to full opacity.
	pub full_life: f64,
	/// Opacity at full life.
	pub max_alpha: f64,
	pub glow_blur: f64,
	pub glow_alpha: f64,
	/// Opacity of the ambient wash at its centre.
	pub wash_alpha: f64,
}

impl Default for ParticleConfig {
	fn default() -> Self {
		Self {
			cap: 40,
			batch: 6,
			spawn_chance: 0.35,
			bounds_margin: 20.0,
			spread_x: 0.3,
			spread_y: 0.6,
			lift: -0.1,
			size: (0.5, 3.5),
			life: (100, 200),
			full_life: 200.0,
			max_alpha: 0.6,
			glow_blur: 12.0,
			glow_alpha: 0.9,
			wash_alpha: 0.02,
		}
	}
}

/// Top-level configuration shared by both surfaces.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct AmbientConfig {
	pub surface: SurfaceConfig,
	pub starfield: StarfieldConfig,
	pub particles: ParticleConfig,
	/// Freeze both surfaces after one paint when the user prefers reduced motion.
	pub respect_reduced_motion: bool,
	/// Fixed RNG seed. Random per mount when unset.
	pub seed: Option<u64>,
}

impl Default for AmbientConfig {
	fn default() -> Self {
		Self {
			surface: SurfaceConfig::default(),
			starfield: StarfieldConfig::default(),
			particles: ParticleConfig::default(),
			respect_reduced_motion: true,
			seed: None,
		}
	}
}

impl AmbientConfig {
	pub fn from_json(json: &str) -> Result<Self, ConfigError> {
		Ok(serde_json::from_str(json)?)
	}
}
