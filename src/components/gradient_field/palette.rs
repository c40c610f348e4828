//! Cyclic color palette and gradient sampling.
//!
//! The palette is an ordered list of at least two colors. Index 0 doubles as
//! the page background and is never used as an interpolation endpoint by
//! [`Palette::sample`]; the gradient cycles over indices `1..len`.

use rand::Rng;
use thiserror::Error;

use super::color::{Color, ColorError};
use super::config::Adjustments;

/// Errors produced when building a palette.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum PaletteError {
	/// Fewer than two colors.
	#[error("palette needs at least 2 colors, got {0}")]
	TooShort(usize),
	/// One entry failed to parse.
	#[error("color {index} is invalid: {source}")]
	BadColor {
		/// Position of the bad entry.
		index: usize,
		/// Why it failed.
		#[source]
		source: ColorError,
	},
}

/// Ordered gradient colors, always at least two long.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Palette {
	colors: Vec<Color>,
}

impl Default for Palette {
	fn default() -> Self {
		Self {
			colors: vec![
				Color::rgb(0xff, 0xfd, 0x8c), // Butter
				Color::rgb(0x97, 0xff, 0xf4), // Aqua
				Color::rgb(0xff, 0x6b, 0x6b), // Coral
				Color::rgb(0x70, 0x91, 0xf5), // Cornflower
				Color::rgb(0xd6, 0xa3, 0xff), // Lilac
				Color::rgb(0xba, 0xe9, 0xbd), // Mint
				Color::rgb(0x53, 0x5e, 0xf9), // Indigo
			],
		}
	}
}

impl Palette {
	/// Number of colors the randomize action produces.
	pub const RANDOM_LEN: usize = 7;

	/// Wrap `colors`, rejecting lists shorter than two.
	pub fn new(colors: Vec<Color>) -> Result<Self, PaletteError> {
		if colors.len() < 2 {
			return Err(PaletteError::TooShort(colors.len()));
		}
		Ok(Self { colors })
	}

	/// Parse a list of `#rrggbb` (or bare `rrggbb`) strings.
	pub fn from_hex_list<S: AsRef<str>>(hexes: &[S]) -> Result<Self, PaletteError> {
		let colors = hexes
			.iter()
			.enumerate()
			.map(|(index, hex)| {
				Color::from_hex(hex.as_ref().trim())
					.map_err(|source| PaletteError::BadColor { index, source })
			})
			.collect::<Result<Vec<_>, _>>()?;
		Self::new(colors)
	}

	/// Parse the `colors` query value: hex digits without `#`, comma-joined.
	pub fn from_query_value(value: &str) -> Result<Self, PaletteError> {
		let hexes: Vec<&str> = value.split(',').collect();
		Self::from_hex_list(&hexes)
	}

	/// Inverse of [`Palette::from_query_value`].
	pub fn to_query_value(&self) -> String {
		self.colors
			.iter()
			.map(|c| c.to_hex().trim_start_matches('#').to_string())
			.collect::<Vec<_>>()
			.join(",")
	}

	/// `len` uniformly random colors in `0x000000..0xffffff`.
	pub fn random<R: Rng + ?Sized>(rng: &mut R, len: usize) -> Self {
		let colors = (0..len.max(2))
			.map(|_| Color::from_u32(rng.gen_range(0..0xff_ffff)))
			.collect();
		Self { colors }
	}

	/// All entries, background first.
	pub fn colors(&self) -> &[Color] {
		&self.colors
	}

	/// Number of entries, background included.
	pub fn len(&self) -> usize {
		self.colors.len()
	}

	/// Never true for a constructed palette.
	pub fn is_empty(&self) -> bool {
		self.colors.is_empty()
	}

	/// Entry at `index`, if any.
	pub fn get(&self, index: usize) -> Option<Color> {
		self.colors.get(index).copied()
	}

	/// Replace a single color. Returns false if `index` is out of range.
	pub fn set_color(&mut self, index: usize, color: Color) -> bool {
		match self.colors.get_mut(index) {
			Some(slot) => {
				*slot = color;
				true
			}
			None => false,
		}
	}

	/// Page background color (first entry).
	pub fn background(&self) -> Color {
		self.colors[0]
	}

	/// Sample the gradient for a point.
	///
	/// `t = (progress + offset) * (len - 2)`; the integer part selects a pair of
	/// neighbouring entries among indices `1..len` (cycling back to 1 after the
	/// last entry) and the fractional part blends between them.
	pub fn sample(&self, progress: f64, offset: f64) -> Color {
		let n = self.colors.len();
		let span = (n - 1) as i64;
		let t = (progress + offset) * (n as f64 - 2.0);
		let base = t.floor();
		let step = base as i64;
		let i = 1 + step.rem_euclid(span) as usize;
		let next = if i + 1 >= n { 1 } else { i + 1 };
		self.colors[i].lerp(self.colors[next], t - base)
	}

	/// New palette with hue rotated by `hue` degrees and `saturation` /
	/// `brightness` percentage points added to S and L (clamped).
	///
	/// Works from the current colors, so applying the same adjustment twice
	/// compounds.
	pub fn adjusted(&self, adjustments: &Adjustments) -> Self {
		let colors = self
			.colors
			.iter()
			.map(|&c| {
				let mut hsl = c.to_hsl();
				hsl.h = (hsl.h * 360.0 + adjustments.hue as f64).rem_euclid(360.0) / 360.0;
				hsl.s = (hsl.s + adjustments.saturation as f64 / 100.0).clamp(0.0, 1.0);
				hsl.l = (hsl.l + adjustments.brightness as f64 / 100.0).clamp(0.0, 1.0);
				Color::from_hsl(hsl)
			})
			.collect();
		Self { colors }
	}

	/// In-place form of [`Palette::adjusted`].
	pub fn apply_adjustments(&mut self, adjustments: &Adjustments) {
		*self = self.adjusted(adjustments);
	}
}
