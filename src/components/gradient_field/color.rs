//! Color representation and color-space conversions.
//!
//! Colors travel through the app as `#rrggbb` hex strings (URL parameters,
//! page settings, swatches) and are drawn as `rgb(r, g, b)` CSS strings.
//! Hue/brightness/saturation adjustments go through HSL.

use thiserror::Error;

/// Errors produced when parsing a hex color string.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ColorError {
	/// The string was not six hex digits (with or without a leading `#`).
	#[error("expected 6 hex digits, got {0:?}")]
	BadLength(String),
	/// The string contained something other than hex digits.
	#[error("invalid hex digit in {0:?}")]
	BadDigit(String),
}

/// Opaque RGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Color {
	/// Red channel.
	pub r: u8,
	/// Green channel.
	pub g: u8,
	/// Blue channel.
	pub b: u8,
}

impl Color {
	/// Build from channels.
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b }
	}

	/// Parse `#rrggbb` or `rrggbb`.
	pub fn from_hex(hex: &str) -> Result<Self, ColorError> {
		let digits = hex.strip_prefix('#').unwrap_or(hex);
		if digits.len() != 6 {
			return Err(ColorError::BadLength(hex.to_string()));
		}
		if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
			return Err(ColorError::BadDigit(hex.to_string()));
		}
		let channel = |range: std::ops::Range<usize>| {
			u8::from_str_radix(&digits[range], 16).map_err(|_| ColorError::BadDigit(hex.to_string()))
		};
		Ok(Self {
			r: channel(0..2)?,
			g: channel(2..4)?,
			b: channel(4..6)?,
		})
	}

	/// Pack into a 24-bit integer (`0xrrggbb`).
	pub fn from_u32(value: u32) -> Self {
		Self {
			r: ((value >> 16) & 0xff) as u8,
			g: ((value >> 8) & 0xff) as u8,
			b: (value & 0xff) as u8,
		}
	}

	/// Lowercase `#rrggbb`.
	pub fn to_hex(self) -> String {
		format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
	}

	/// CSS `rgb(r, g, b)` form used for canvas fill and shadow styles.
	pub fn to_css_rgb(self) -> String {
		format!("rgb({}, {}, {})", self.r, self.g, self.b)
	}

	/// Linear interpolation between two colors, rounding each channel to the
	/// nearest integer. `t` is not clamped.
	pub fn lerp(self, other: Color, t: f64) -> Self {
		let mix = |a: u8, b: u8| round_channel(a as f64 + (b as f64 - a as f64) * t);
		Self {
			r: mix(self.r, other.r),
			g: mix(self.g, other.g),
			b: mix(self.b, other.b),
		}
	}

	/// Convert to HSL with every component in `[0, 1]`.
	pub fn to_hsl(self) -> Hsl {
		let (h, s, l) = rgb_to_hsl(self.r, self.g, self.b);
		Hsl { h, s, l }
	}

	/// Inverse of [`Color::to_hsl`], rounding each channel.
	pub fn from_hsl(hsl: Hsl) -> Self {
		let (r, g, b) = hsl_to_rgb(hsl.h, hsl.s, hsl.l);
		Self { r, g, b }
	}
}

/// Hue, saturation and lightness, each in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hsl {
	/// Hue as a fraction of a full turn.
	pub h: f64,
	/// Saturation.
	pub s: f64,
	/// Lightness.
	pub l: f64,
}

/// Round to the nearest integer and saturate into `[0, 255]`. NaN maps to 0.
fn round_channel(value: f64) -> u8 {
	value.round().clamp(0.0, 255.0) as u8
}

/// Convert 8-bit RGB to HSL (`h`, `s`, `l` all in `[0, 1]`).
pub fn rgb_to_hsl(r: u8, g: u8, b: u8) -> (f64, f64, f64) {
	let (r, g, b) = (r as f64 / 255.0, g as f64 / 255.0, b as f64 / 255.0);
	let max = r.max(g).max(b);
	let min = r.min(g).min(b);
	let l = (max + min) / 2.0;

	if max == min {
		// achromatic
		return (0.0, 0.0, l);
	}

	let d = max - min;
	let s = if l > 0.5 {
		d / (2.0 - max - min)
	} else {
		d / (max + min)
	};
	let h = if max == r {
		(g - b) / d + if g < b { 6.0 } else { 0.0 }
	} else if max == g {
		(b - r) / d + 2.0
	} else {
		(r - g) / d + 4.0
	};

	(h / 6.0, s, l)
}

/// Convert HSL (all in `[0, 1]`) to 8-bit RGB.
pub fn hsl_to_rgb(h: f64, s: f64, l: f64) -> (u8, u8, u8) {
	if s == 0.0 {
		let v = round_channel(l * 255.0);
		return (v, v, v);
	}

	let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
	let p = 2.0 * l - q;
	(
		round_channel(hue_to_rgb(p, q, h + 1.0 / 3.0) * 255.0),
		round_channel(hue_to_rgb(p, q, h) * 255.0),
		round_channel(hue_to_rgb(p, q, h - 1.0 / 3.0) * 255.0),
	)
}

fn hue_to_rgb(p: f64, q: f64, mut t: f64) -> f64 {
	if t < 0.0 {
		t += 1.0;
	}
	if t > 1.0 {
		t -= 1.0;
	}
	if t < 1.0 / 6.0 {
		p + (q - p) * 6.0 * t
	} else if t < 1.0 / 2.0 {
		q
	} else if t < 2.0 / 3.0 {
		p + (q - p) * (2.0 / 3.0 - t) * 6.0
	} else {
		p
	}
}
