//! Application state for the gradient field.
//!
//! [`GradientState`] owns the tunable parameters, the palette, the point
//! field and the cursor tracker. Control surfaces mutate it through the
//! setters between frames; the animation loop calls [`GradientState::frame`]
//! once per display refresh.

use log::debug;
use rand::SeedableRng;
use rand::rngs::SmallRng;

use super::color::Color;
use super::config::{Adjustments, Settings, SimulationConfig};
use super::field::ParticleField;
use super::mouse::MouseTracker;
use super::palette::Palette;
use super::render::{self, Surface};

/// Everything one running gradient needs between frames.
pub struct GradientState {
	config: SimulationConfig,
	adjustments: Adjustments,
	palette: Palette,
	field: ParticleField,
	/// Cursor position and activity.
	pub mouse: MouseTracker,
	rng: SmallRng,
	frame_count: u64,
}

impl GradientState {
	/// Build the state for a `width` x `height` canvas. `seed` drives every
	/// random draw (positions, velocities, offsets, random palettes).
	pub fn new(settings: &Settings, width: f64, height: f64, seed: u64) -> Self {
		let mut rng = SmallRng::seed_from_u64(seed);
		let config = settings.config.clone();
		let field = ParticleField::new(
			&mut rng,
			config.count,
			width,
			height,
			config.speed,
			config.radius,
		);
		Self {
			palette: settings.palette(),
			adjustments: settings.adjustments,
			mouse: MouseTracker::centered(width, height),
			config,
			field,
			rng,
			frame_count: 0,
		}
	}

	/// Live parameters.
	pub fn config(&self) -> &SimulationConfig {
		&self.config
	}

	/// Adjustment most recently applied to the palette.
	pub fn adjustments(&self) -> &Adjustments {
		&self.adjustments
	}

	/// Current palette, adjustments included.
	pub fn palette(&self) -> &Palette {
		&self.palette
	}

	/// The points.
	pub fn field(&self) -> &ParticleField {
		&self.field
	}

	/// Frames advanced so far.
	pub fn frame_count(&self) -> u64 {
		self.frame_count
	}

	/// Canvas width (px).
	pub fn width(&self) -> f64 {
		self.field.width()
	}

	/// Canvas height (px).
	pub fn height(&self) -> f64 {
		self.field.height()
	}

	/// Backdrop blur of the glass overlay (px).
	pub fn set_blur(&mut self, blur: f64) {
		self.config.blur = blur;
	}

	/// Shadow blur around each disc (px).
	pub fn set_shadow(&mut self, shadow: f64) {
		self.config.shadow = shadow;
	}

	/// Strength of the push away from the cursor.
	pub fn set_smoothness(&mut self, smoothness: f64) {
		self.config.smoothness = smoothness;
	}

	/// Disc radius for every point, effective immediately.
	pub fn set_radius(&mut self, radius: f64) {
		self.config.radius = radius;
		self.field.set_radius(radius);
	}

	/// Change the speed factor and give every point a new velocity.
	pub fn set_speed(&mut self, speed: f64) {
		self.config.speed = speed;
		self.field.set_speed(&mut self.rng, speed);
	}

	/// Change the point count, capped at [`SimulationConfig::MAX_COUNT`].
	/// Rebuilds the whole field.
	pub fn set_count(&mut self, count: usize) {
		self.config.count = count.min(SimulationConfig::MAX_COUNT);
		self.reinitialize();
	}

	/// Throw away every point and start over with the current parameters.
	pub fn reinitialize(&mut self) {
		let (width, height) = (self.field.width(), self.field.height());
		self.field.initialize(
			&mut self.rng,
			self.config.count,
			width,
			height,
			self.config.speed,
			self.config.radius,
		);
		debug!("gradient-field: initialized {} points", self.config.count);
	}

	/// Restore the default visual parameters. The palette is kept.
	pub fn reset_defaults(&mut self) {
		self.config = SimulationConfig::default();
		self.reinitialize();
	}

	/// Replace one palette entry. Returns false if `index` is out of range.
	pub fn set_color(&mut self, index: usize, color: Color) -> bool {
		self.palette.set_color(index, color)
	}

	/// Swap in a palette of random colors.
	pub fn randomize_palette(&mut self) {
		self.palette = Palette::random(&mut self.rng, Palette::RANDOM_LEN);
		debug!("gradient-field: random palette {}", self.palette.to_query_value());
	}

	/// Back to the default palette with no adjustment.
	pub fn reset_palette(&mut self) {
		self.palette = Palette::default();
		self.adjustments = Adjustments::default();
	}

	/// Record the adjustment and apply it to the current palette.
	pub fn set_adjustments(&mut self, adjustments: Adjustments) {
		self.adjustments = adjustments;
		self.palette.apply_adjustments(&adjustments);
	}

	/// Cursor moved to `(x, y)` at `now` (seconds).
	pub fn record_mouse_move(&mut self, x: f64, y: f64, now: f64) {
		self.mouse.record_move(x, y, now);
	}

	/// New canvas size. Points scale with it and the cursor moves back to
	/// the center.
	pub fn resize(&mut self, width: f64, height: f64) {
		self.field.resize(width, height);
		self.mouse.recenter(width, height);
	}

	/// CSS color for the page behind the canvas.
	pub fn background_css(&self) -> String {
		self.palette.background().to_hex()
	}

	/// Query pairs for a share URL of the current configuration.
	pub fn share_pairs(&self, embed: bool) -> Vec<(String, String)> {
		Settings::to_query_pairs(&self.config, &self.palette, &self.adjustments, embed)
	}

	/// Advance the simulation to time `now` (seconds).
	pub fn tick(&mut self, now: f64) {
		self.field.advance(&self.mouse, now, &self.config);
		self.frame_count += 1;
	}

	/// One animation frame: advance, then draw.
	pub fn frame<S: Surface + ?Sized>(&mut self, surface: &mut S, now: f64) {
		self.tick(now);
		render::render(self, surface);
	}

	/// Drive `frames` frames spaced `frame_dt` seconds apart starting at
	/// `start`. Returns the time of the frame after the last one.
	pub fn run<S: Surface + ?Sized>(
		&mut self,
		surface: &mut S,
		frames: usize,
		start: f64,
		frame_dt: f64,
	) -> f64 {
		for i in 0..frames {
			self.frame(surface, start + i as f64 * frame_dt);
		}
		start + frames as f64 * frame_dt
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn small_settings() -> Settings {
		Settings {
			config: SimulationConfig {
				count: 8,
				..Default::default()
			},
			..Default::default()
		}
	}

	#[test]
	fn new_uses_settings() {
		let state = GradientState::new(&small_settings(), 640.0, 480.0, 1);
		assert_eq!(state.field().len(), 8);
		assert_eq!(state.palette(), &Palette::default());
		assert_eq!((state.mouse.x, state.mouse.y), (320.0, 240.0));
		assert_eq!(state.background_css(), "#fffd8c");
	}

	#[test]
	fn count_change_reinitializes() {
		let mut state = GradientState::new(&small_settings(), 640.0, 480.0, 1);
		state.record_mouse_move(10.0, 10.0, 0.0);
		state.tick(0.0);
		state.set_count(3);
		assert_eq!(state.config().count, 3);
		assert_eq!(state.field().progress(), &[0.5; 3]);
	}

	#[test]
	fn radius_and_speed_reach_points() {
		let mut state = GradientState::new(&small_settings(), 640.0, 480.0, 2);
		state.set_radius(12.0);
		assert!(state.field().points().iter().all(|p| p.radius == 12.0));
		state.set_speed(0.0);
		assert!(state.field().points().iter().all(|p| p.dx == 0.0 && p.dy == 0.0));
	}

	#[test]
	fn reset_defaults_keeps_palette() {
		let mut state = GradientState::new(&small_settings(), 640.0, 480.0, 3);
		state.randomize_palette();
		let palette = state.palette().clone();
		state.set_blur(1.0);
		state.reset_defaults();
		assert_eq!(state.config(), &SimulationConfig::default());
		assert_eq!(state.field().len(), 120);
		assert_eq!(state.palette(), &palette);
	}

	#[test]
	fn adjustments_compound_until_reset() {
		let mut state = GradientState::new(&small_settings(), 640.0, 480.0, 4);
		let shift = Adjustments {
			hue: 30,
			..Default::default()
		};
		state.set_adjustments(shift);
		let once = state.palette().clone();
		state.set_adjustments(shift);
		assert_ne!(state.palette(), &once);
		assert_eq!(state.adjustments(), &shift);

		state.reset_palette();
		assert_eq!(state.palette(), &Palette::default());
		assert!(state.adjustments().is_identity());
	}

	#[test]
	fn set_color_updates_background() {
		let mut state = GradientState::new(&small_settings(), 640.0, 480.0, 5);
		assert!(state.set_color(0, Color::rgb(0, 0, 0)));
		assert_eq!(state.background_css(), "#000000");
	}

	#[test]
	fn share_pairs_reflect_live_state() {
		let mut state = GradientState::new(&small_settings(), 640.0, 480.0, 6);
		state.set_smoothness(1.25);
		let pairs = state.share_pairs(false);
		assert!(pairs.contains(&("smoothness".to_string(), "1.25".to_string())));
		assert!(pairs.contains(&("count".to_string(), "8".to_string())));
		assert!(!pairs.iter().any(|(k, _)| k == "embed"));
	}

	#[test]
	fn resize_updates_bounds_and_recenters_cursor() {
		let mut state = GradientState::new(&small_settings(), 640.0, 480.0, 7);
		state.record_mouse_move(5.0, 6.0, 2.0);
		state.resize(1280.0, 960.0);
		assert_eq!((state.width(), state.height()), (1280.0, 960.0));
		assert_eq!((state.mouse.x, state.mouse.y), (640.0, 480.0));
		assert_eq!(state.mouse.last_move(), Some(2.0));
	}

	#[test]
	fn set_count_is_capped() {
		let mut state = GradientState::new(&small_settings(), 640.0, 480.0, 8);
		state.set_count(usize::MAX);
		assert_eq!(state.config().count, SimulationConfig::MAX_COUNT);
		assert_eq!(state.field().len(), SimulationConfig::MAX_COUNT);
	}
}
