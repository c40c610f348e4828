//! Tunable parameters and how they are loaded and shared.
//!
//! Settings are layered: built-in defaults, then an optional JSON block on
//! the host page, then URL query parameters. The same keys are written back
//! out when building a share URL so a configuration can be reopened or
//! embedded elsewhere.
//!
//! # Query keys
//!
//! | key | meaning |
//! |-----|---------|
//! | `blur` | backdrop blur of the glass overlay, px |
//! | `radius` | disc radius, px |
//! | `shadow` | canvas shadow blur, px |
//! | `count` | number of points |
//! | `smoothness` | strength of the cursor push |
//! | `speed` | velocity range of each point |
//! | `colors` | palette as comma-joined hex digits without `#` |
//! | `hue`, `brightness`, `saturation` | one-shot palette adjustment |
//! | `embed` | `true` hides the controls |

use log::warn;
use serde::Deserialize;

use super::palette::Palette;

/// Visual and physics parameters read by every frame.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
	/// Backdrop blur applied to the glass overlay (px).
	pub blur: f64,
	/// Disc radius (px). Also the margin used for edge wrapping.
	pub radius: f64,
	/// Canvas shadow blur around each disc (px).
	pub shadow: f64,
	/// Number of points in the field.
	pub count: usize,
	/// Multiplier for the push away from the cursor.
	pub smoothness: f64,
	/// Velocity components are drawn from `[-speed/2, speed/2]`.
	pub speed: f64,
}

impl SimulationConfig {
	/// Largest point count accepted from the page or the URL.
	pub const MAX_COUNT: usize = 5_000;
}

impl Default for SimulationConfig {
	fn default() -> Self {
		Self {
			blur: 90.0,
			radius: 100.0,
			shadow: 4.0,
			count: 120,
			smoothness: 6.6,
			speed: 1.7,
		}
	}
}

/// Hue rotation (degrees) and brightness/saturation shifts (percentage
/// points) applied to the palette.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Adjustments {
	/// Hue rotation in degrees.
	pub hue: i32,
	/// Added to HSL lightness, in percentage points.
	pub brightness: i32,
	/// Added to HSL saturation, in percentage points.
	pub saturation: i32,
}

impl Adjustments {
	/// True when applying the adjustment changes nothing.
	pub fn is_identity(&self) -> bool {
		*self == Self::default()
	}
}

/// Everything needed to start the app: parameters, palette, adjustment and
/// whether the controls are hidden.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
	#[serde(flatten)]
	pub config: SimulationConfig,
	/// Palette as `#rrggbb` strings. `None` keeps the default palette.
	pub colors: Option<Vec<String>>,
	#[serde(flatten)]
	pub adjustments: Adjustments,
	/// Hide the controls.
	pub embed: bool,
}

/// Lookup of a single query parameter by key.
pub trait QuerySource {
	/// Raw value of `key`, if present.
	fn get(&self, key: &str) -> Option<String>;
}

impl QuerySource for [(&str, &str)] {
	fn get(&self, key: &str) -> Option<String> {
		self.iter()
			.find(|(k, _)| *k == key)
			.map(|(_, v)| (*v).to_string())
	}
}

impl QuerySource for Vec<(String, String)> {
	fn get(&self, key: &str) -> Option<String> {
		self.iter().find(|(k, _)| k == key).map(|(_, v)| v.clone())
	}
}

impl QuerySource for web_sys::UrlSearchParams {
	fn get(&self, key: &str) -> Option<String> {
		web_sys::UrlSearchParams::get(self, key)
	}
}

/// Parse `key` if present. Malformed values are logged and skipped so the
/// previous layer's value survives.
fn parse_param<T: std::str::FromStr, Q: QuerySource + ?Sized>(query: &Q, key: &str) -> Option<T>
where
	T::Err: std::fmt::Display,
{
	let raw = query.get(key)?;
	match raw.trim().parse::<T>() {
		Ok(value) => Some(value),
		Err(e) => {
			warn!("gradient-field: ignoring query parameter {}={:?}: {}", key, raw, e);
			None
		}
	}
}

/// Like [`parse_param`] but also rejects NaN and infinities.
fn parse_finite<Q: QuerySource + ?Sized>(query: &Q, key: &str) -> Option<f64> {
	let value: f64 = parse_param(query, key)?;
	if value.is_finite() {
		Some(value)
	} else {
		warn!("gradient-field: ignoring non-finite query parameter {}={}", key, value);
		None
	}
}

impl Settings {
	/// Parse the JSON settings block embedded in the host page.
	///
	/// A `count` above [`SimulationConfig::MAX_COUNT`] is rejected and the
	/// default kept.
	pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
		let mut settings: Self = serde_json::from_str(json)?;
		if settings.config.count > SimulationConfig::MAX_COUNT {
			warn!(
				"gradient-field: ignoring page count {} (max {})",
				settings.config.count,
				SimulationConfig::MAX_COUNT
			);
			settings.config.count = SimulationConfig::default().count;
		}
		Ok(settings)
	}

	/// Overlay URL query parameters on top of the current values.
	pub fn apply_query<Q: QuerySource + ?Sized>(&mut self, query: &Q) {
		let config = &mut self.config;
		if let Some(v) = parse_finite(query, "blur") {
			config.blur = v;
		}
		if let Some(v) = parse_finite(query, "radius") {
			config.radius = v;
		}
		if let Some(v) = parse_finite(query, "shadow") {
			config.shadow = v;
		}
		if let Some(v) = parse_param::<usize, _>(query, "count") {
			if v <= SimulationConfig::MAX_COUNT {
				config.count = v;
			} else {
				warn!(
					"gradient-field: ignoring count={} (max {})",
					v,
					SimulationConfig::MAX_COUNT
				);
			}
		}
		if let Some(v) = parse_finite(query, "smoothness") {
			config.smoothness = v;
		}
		if let Some(v) = parse_finite(query, "speed") {
			config.speed = v;
		}

		if let Some(raw) = query.get("colors") {
			match Palette::from_query_value(&raw) {
				Ok(palette) => {
					self.colors = Some(palette.colors().iter().map(|c| c.to_hex()).collect());
				}
				Err(e) => warn!("gradient-field: ignoring colors={:?}: {}", raw, e),
			}
		}

		let adjustments = &mut self.adjustments;
		if let Some(v) = parse_param(query, "hue") {
			adjustments.hue = v;
		}
		if let Some(v) = parse_param(query, "brightness") {
			adjustments.brightness = v;
		}
		if let Some(v) = parse_param(query, "saturation") {
			adjustments.saturation = v;
		}

		if let Some(embed) = query.get("embed") {
			self.embed = embed == "true";
		}
	}

	/// The starting palette: configured colors (or the defaults) with the
	/// adjustment applied once.
	pub fn palette(&self) -> Palette {
		let base = match &self.colors {
			Some(hexes) => Palette::from_hex_list(hexes).unwrap_or_else(|e| {
				warn!("gradient-field: invalid palette, using defaults: {}", e);
				Palette::default()
			}),
			None => Palette::default(),
		};
		if self.adjustments.is_identity() {
			base
		} else {
			base.adjusted(&self.adjustments)
		}
	}

	/// Query pairs describing a running configuration, in the order they are
	/// written to share URLs. `embed` appends `embed=true`.
	pub fn to_query_pairs(
		config: &SimulationConfig,
		palette: &Palette,
		adjustments: &Adjustments,
		embed: bool,
	) -> Vec<(String, String)> {
		let mut pairs = vec![
			("blur".to_string(), config.blur.to_string()),
			("radius".to_string(), config.radius.to_string()),
			("shadow".to_string(), config.shadow.to_string()),
			("count".to_string(), config.count.to_string()),
			("smoothness".to_string(), config.smoothness.to_string()),
			("speed".to_string(), config.speed.to_string()),
			("colors".to_string(), palette.to_query_value()),
			("hue".to_string(), adjustments.hue.to_string()),
			("brightness".to_string(), adjustments.brightness.to_string()),
			("saturation".to_string(), adjustments.saturation.to_string()),
		];
		if embed {
			pairs.push(("embed".to_string(), "true".to_string()));
		}
		pairs
	}
}

/// Full-page `<iframe>` snippet for embedding a share URL as a background.
pub fn embed_code(url: &str) -> String {
	format!(
		"<iframe src=\"{}\" width=\"100%\" height=\"100%\" \
		 style=\"border:0;position:absolute;top:0;left:0;z-index:-1;\" allowfullscreen></iframe>",
		url.replace('&', "&amp;").replace('"', "&quot;")
	)
}
