//! Device-pixel-ratio aware surface sizing.
//!
//! # Coordinate Spaces
//!
//! - **Logical**: CSS pixels. All entity positions, radii and velocities are
//!   logical.
//! - **Backing**: physical pixels of the canvas buffer, `floor(logical * ratio)`.
//!
//! The canvas transform is set to scale by the pixel ratio after every resize,
//! so drawing code never sees backing coordinates.

use super::config::StarfieldConfig;

/// Clamps a reported device pixel ratio into `[1, max]`.
///
/// Missing or nonsensical ratios (NaN, zero, negative) count as 1.
pub fn clamp_pixel_ratio(raw: f64, max: f64) -> f64 {
	if !raw.is_finite() || raw <= 0.0 {
		return 1.0;
	}
	raw.clamp(1.0, max.max(1.0))
}

/// Logical size of a surface plus the ratio used for its backing store.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceSize {
	pub width: f64,
	pub height: f64,
	pub pixel_ratio: f64,
}

impl SurfaceSize {
	pub fn new(width: f64, height: f64, raw_ratio: f64, max_ratio: f64) -> Self {
		Self {
			width: sanitize(width),
			height: sanitize(height),
			pixel_ratio: clamp_pixel_ratio(raw_ratio, max_ratio),
		}
	}

	pub fn backing_width(&self) -> u32 {
		(self.width * self.pixel_ratio).floor() as u32
	}

	pub fn backing_height(&self) -> u32 {
		(self.height * self.pixel_ratio).floor() as u32
	}
}

fn sanitize(v: f64) -> f64 {
	if v.is_finite() { v.max(0.0) } else { 0.0 }
}

/// Number of stars for a surface: one per `area_per_star` px², bounded by
/// `min_stars` and `max_stars`.
pub fn star_population(width: f64, height: f64, config: &StarfieldConfig) -> usize {
	let per_area = if config.area_per_star > 0.0 {
		(sanitize(width) * sanitize(height) / config.area_per_star).floor() as usize
	} else {
		config.max_stars
	};
	per_area.clamp(config.min_stars, config.max_stars.max(config.min_stars))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn pixel_ratio_is_clamped() {
		assert_eq!(clamp_pixel_ratio(0.5, 2.0), 1.0);
		assert_eq!(clamp_pixel_ratio(1.5, 2.0), 1.5);
		assert_eq!(clamp_pixel_ratio(3.0, 2.0), 2.0);
		assert_eq!(clamp_pixel_ratio(f64::NAN, 2.0), 1.0);
		assert_eq!(clamp_pixel_ratio(0.0, 2.0), 1.0);
		assert_eq!(clamp_pixel_ratio(3.0, 0.5), 1.0);
	}

	#[test]
	fn backing_size_rounds_down() {
		let size = SurfaceSize::new(333.0, 101.0, 1.5, 2.0);
		assert_eq!(size.backing_width(), 499);
		assert_eq!(size.backing_height(), 151);

		let hi_dpi = SurfaceSize::new(800.0, 600.0, 4.0, 2.0);
		assert_eq!(hi_dpi.backing_width(), 1600);
		assert_eq!(hi_dpi.backing_height(), 1200);
		assert_eq!(hi_dpi.width, 800.0);
	}

	#[test]
	fn degenerate_sizes_are_zero() {
		let size = SurfaceSize::new(-10.0, f64::INFINITY, 1.0, 2.0);
		assert_eq!(size.width, 0.0);
		assert_eq!(size.height, 0.0);
		assert_eq!(size.backing_width(), 0);
	}

	#[test]
	fn star_population_applies_ceiling_and_floor() {
		let config = StarfieldConfig::default();
		assert_eq!(star_population(1920.0, 1080.0, &config), 148);
		assert_eq!(star_population(2560.0, 1440.0, &config), 160);
		assert_eq!(star_population(2240.0, 1000.0, &config), 160);
		assert_eq!(star_population(2254.0, 1000.0, &config), 160);
		assert_eq!(star_population(200.0, 200.0, &config), 55);
		assert_eq!(star_population(1400.0, 900.0, &config), 90);
		assert_eq!(star_population(0.0, 0.0, &config), 55);
	}

	#[test]
	fn star_population_is_deterministic() {
		let config = StarfieldConfig::default();
		let a = star_population(1280.0, 720.0, &config);
		let b = star_population(1280.0, 720.0, &config);
		assert_eq!(a, b);
		assert_eq!(a, 65);
	}
}
