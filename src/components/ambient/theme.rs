//! Theme colors for the ambient surfaces.
//!
//! Colors come from CSS custom properties on the document root. Each token is
//! read once per mounted surface and parsed into a [`Color`]; tokens that are
//! empty or malformed fall back to a per-slot default.

use web_sys::Window;

/// An opaque RGB color. Alpha is applied at paint time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
}

impl Color {
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b }
	}

	/// Parses `#rgb`, `#rrggbb` (the `#` is optional) or `rgb()`/`rgba()`
	/// functional notation. Returns `None` for anything else.
	pub fn parse(input: &str) -> Option<Self> {
		let s = input.trim();
		if s.is_empty() {
			return None;
		}
		if s.get(..3).is_some_and(|p| p.eq_ignore_ascii_case("rgb")) {
			parse_functional(s)
		} else {
			parse_hex(s)
		}
	}

	/// Parses `token`, substituting `fallback` when it is unparseable.
	pub fn resolve(token: &str, fallback: Color) -> Self {
		Self::parse(token).unwrap_or(fallback)
	}

	/// CSS `rgba()` string with `alpha` clamped to [0, 1].
	pub fn to_css(self, alpha: f64) -> String {
		format!(
			"rgba({}, {}, {}, {})",
			self.r,
			self.g,
			self.b,
			clamp01(alpha)
		)
	}
}

pub(crate) fn clamp01(v: f64) -> f64 {
	if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
}

fn parse_hex(s: &str) -> Option<Color> {
	let digits = s.strip_prefix('#').unwrap_or(s);
	if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
		return None;
	}
	let nibble = |i: usize| char::from(digits.as_bytes()[i]).to_digit(16).map(|d| d as u8);
	let byte = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();

	match digits.len() {
		3 => Some(Color::rgb(
			nibble(0)? * 17,
			nibble(1)? * 17,
			nibble(2)? * 17,
		)),
		6 => Some(Color::rgb(byte(0)?, byte(2)?, byte(4)?)),
		_ => None,
	}
}

fn parse_functional(s: &str) -> Option<Color> {
	let lower = s.to_ascii_lowercase();
	let body = lower
		.strip_prefix("rgba(")
		.or_else(|| lower.strip_prefix("rgb("))?
		.strip_suffix(')')?;

	let parts: Vec<&str> = body.split(',').map(str::trim).collect();
	if !(3..=4).contains(&parts.len()) {
		return None;
	}
	if let Some(alpha) = parts.get(3) {
		if alpha.is_empty() || !alpha.bytes().all(|b| b.is_ascii_digit() || b == b'.') {
			return None;
		}
	}

	let channel = |part: &str| -> Option<u8> {
		if part.is_empty() || part.len() > 3 || !part.bytes().all(|b| b.is_ascii_digit()) {
			return None;
		}
		part.parse::<u16>().ok().map(|v| v.min(255) as u8)
	};

	Some(Color::rgb(
		channel(parts[0])?,
		channel(parts[1])?,
		channel(parts[2])?,
	))
}

/// CSS custom property and its fallback color for one palette slot.
#[derive(Clone, Copy, Debug)]
pub struct ThemeToken {
	pub name: &'static str,
	pub fallback: Color,
}

/// Tokens resolved into the star palette, in palette order.
pub const PALETTE_TOKENS: [ThemeToken; 3] = [
	ThemeToken {
		name: "--primary",
		fallback: Color::rgb(0, 217, 255),
	},
	ThemeToken {
		name: "--chart-2",
		fallback: Color::rgb(0, 184, 212),
	},
	ThemeToken {
		name: "--chart-4",
		fallback: Color::rgb(0, 122, 128),
	},
];

/// Backdrop tone the particle wash fades into.
pub const BACKDROP: Color = Color::rgb(10, 14, 39);

/// The three accent colors shared by every entity on a surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
	colors: [Color; 3],
}

impl Palette {
	pub const LEN: usize = 3;

	pub const fn new(primary: Color, secondary: Color, tertiary: Color) -> Self {
		Self {
			colors: [primary, secondary, tertiary],
		}
	}

	/// Resolves every slot through `read`, which returns the raw token value
	/// (possibly empty).
	pub fn resolve(read: impl Fn(&str) -> String) -> Self {
		Self {
			colors: PALETTE_TOKENS.map(|token| Color::resolve(&read(token.name), token.fallback)),
		}
	}

	/// Reads the palette from the document root's computed style.
	pub fn from_document(window: &Window) -> Self {
		let style = window
			.document()
			.and_then(|d| d.document_element())
			.and_then(|root| window.get_computed_style(&root).ok().flatten());

		Self::resolve(|name| {
			style
				.as_ref()
				.and_then(|s| s.get_property_value(name).ok())
				.unwrap_or_default()
		})
	}

	pub fn primary(&self) -> Color {
		self.colors[0]
	}

	pub fn get(&self, index: usize) -> Color {
		self.colors[index % Self::LEN]
	}
}

impl Default for Palette {
	fn default() -> Self {
		Self::new(
			PALETTE_TOKENS[0].fallback,
			PALETTE_TOKENS[1].fallback,
			PALETTE_TOKENS[2].fallback,
		)
	}
}
