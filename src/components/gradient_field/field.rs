//! The moving point field.
//!
//! Each point drifts with its own velocity, gets pushed away when the cursor
//! comes close, creeps toward the cursor while it is idle, and wraps around
//! the canvas edges. A parallel `progress` vector tracks where each point
//! sits on the palette gradient.

use rand::Rng;

use super::config::SimulationConfig;
use super::mouse::MouseTracker;

/// Points closer than this to the cursor are pushed away (px).
pub const REPULSION_RADIUS: f64 = 160.0;
/// Fraction of the gap to the target progress closed each active frame.
pub const PROGRESS_DAMPING: f64 = 0.05;
/// Step taken toward the idle cursor (px).
pub const IDLE_STEP: f64 = 0.5;
/// Time between idle steps for a single point (s).
pub const IDLE_COOLDOWN: f64 = 1.0;
/// Upper bound (exclusive) of each point's phase offset.
pub const MAX_PHASE_OFFSET: f64 = 0.2;
/// Progress every point starts from.
pub const NEUTRAL_PROGRESS: f64 = 0.5;

/// A single disc.
#[derive(Clone, Debug, PartialEq)]
pub struct Point {
	/// Canvas-space position (px).
	pub x: f64,
	/// Canvas-space position (px).
	pub y: f64,
	/// Velocity, px per frame.
	pub dx: f64,
	/// Velocity, px per frame.
	pub dy: f64,
	/// Disc radius and wrap margin (px).
	pub radius: f64,
	/// Fixed bias added to progress before sampling, in `[0, 0.2)`.
	pub random_offset: f64,
	/// The point will not take another idle step before this time (s).
	pub drift_cooldown_until: f64,
}

impl Point {
	/// True while the point waits out its idle-step cooldown.
	pub fn is_moving_to_mouse(&self, now: f64) -> bool {
		now < self.drift_cooldown_until
	}
}

/// Owns the points and their gradient progress.
pub struct ParticleField {
	points: Vec<Point>,
	progress: Vec<f64>,
	width: f64,
	height: f64,
}

fn random_velocity<R: Rng + ?Sized>(rng: &mut R, speed: f64) -> f64 {
	(rng.r#gen::<f64>() - 0.5) * speed
}

impl ParticleField {
	/// A field of `count` fresh points; see [`ParticleField::initialize`].
	pub fn new<R: Rng + ?Sized>(
		rng: &mut R,
		count: usize,
		width: f64,
		height: f64,
		speed: f64,
		radius: f64,
	) -> Self {
		let mut field = Self {
			points: Vec::new(),
			progress: Vec::new(),
			width,
			height,
		};
		field.initialize(rng, count, width, height, speed, radius);
		field
	}

	/// Replace every point with `count` fresh ones and reset progress.
	pub fn initialize<R: Rng + ?Sized>(
		&mut self,
		rng: &mut R,
		count: usize,
		width: f64,
		height: f64,
		speed: f64,
		radius: f64,
	) {
		self.width = width;
		self.height = height;
		self.points = (0..count)
			.map(|_| Point {
				x: rng.r#gen::<f64>() * width,
				y: rng.r#gen::<f64>() * height,
				dx: random_velocity(rng, speed),
				dy: random_velocity(rng, speed),
				radius,
				random_offset: rng.r#gen::<f64>() * MAX_PHASE_OFFSET,
				drift_cooldown_until: f64::NEG_INFINITY,
			})
			.collect();
		self.progress = vec![NEUTRAL_PROGRESS; count];
	}

	/// Advance every point by one frame.
	pub fn advance(&mut self, mouse: &MouseTracker, now: f64, config: &SimulationConfig) {
		let mouse_active = mouse.is_active(now);
		let diagonal = self.width.hypot(self.height);
		let (width, height) = (self.width, self.height);

		for (p, progress) in self.points.iter_mut().zip(self.progress.iter_mut()) {
			let (to_mouse_x, to_mouse_y) = (mouse.x - p.x, mouse.y - p.y);
			let dist = to_mouse_x.hypot(to_mouse_y);
			let t = dist / diagonal;

			if mouse_active {
				*progress += (t - *progress) * PROGRESS_DAMPING;
			}

			if dist < REPULSION_RADIUS {
				let angle = to_mouse_y.atan2(to_mouse_x);
				let falloff = 1.0 - t;
				p.x -= angle.cos() * config.smoothness * falloff;
				p.y -= angle.sin() * config.smoothness * falloff;
			}

			if !mouse_active && !p.is_moving_to_mouse(now) {
				let angle = (mouse.y - p.y).atan2(mouse.x - p.x);
				p.x += angle.cos() * IDLE_STEP;
				p.y += angle.sin() * IDLE_STEP;
				p.drift_cooldown_until = now + IDLE_COOLDOWN;
			}

			p.x += p.dx;
			p.y += p.dy;

			wrap(p, width, height);
		}
	}

	/// Draw new velocities for every point (speed changed).
	pub fn set_speed<R: Rng + ?Sized>(&mut self, rng: &mut R, speed: f64) {
		for p in &mut self.points {
			p.dx = random_velocity(rng, speed);
			p.dy = random_velocity(rng, speed);
		}
	}

	/// Give every point the same radius.
	pub fn set_radius(&mut self, radius: f64) {
		for p in &mut self.points {
			p.radius = radius;
		}
	}

	/// Resize the field bounds, scaling positions proportionally.
	pub fn resize(&mut self, width: f64, height: f64) {
		let scale_x = width / self.width;
		let scale_y = height / self.height;

		if scale_x.is_finite() && scale_y.is_finite() {
			for p in &mut self.points {
				p.x *= scale_x;
				p.y *= scale_y;
			}
		}

		self.width = width;
		self.height = height;
	}

	/// All points, in draw order.
	pub fn points(&self) -> &[Point] {
		&self.points
	}

	/// Gradient progress, parallel to [`ParticleField::points`].
	pub fn progress(&self) -> &[f64] {
		&self.progress
	}

	/// Points paired with their progress, in draw order.
	pub fn iter(&self) -> impl Iterator<Item = (&Point, f64)> {
		self.points.iter().zip(self.progress.iter().copied())
	}

	/// Number of points.
	pub fn len(&self) -> usize {
		self.points.len()
	}

	/// True for a zero-count field.
	pub fn is_empty(&self) -> bool {
		self.points.is_empty()
	}

	/// Field width (px).
	pub fn width(&self) -> f64 {
		self.width
	}

	/// Field height (px).
	pub fn height(&self) -> f64 {
		self.height
	}

	#[cfg(test)]
	pub(crate) fn points_mut(&mut self) -> &mut [Point] {
		&mut self.points
	}
}

/// Toroidal wrap: leaving by more than one radius re-enters one radius past
/// the opposite edge.
fn wrap(p: &mut Point, width: f64, height: f64) {
	let r = p.radius;
	if p.x < -r {
		p.x = width + r;
	}
	if p.x > width + r {
		p.x = -r;
	}
	if p.y < -r {
		p.y = height + r;
	}
	if p.y > height + r {
		p.y = -r;
	}
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;
	use rand::rngs::SmallRng;

	use super::*;

	fn still_field(points: Vec<Point>, width: f64, height: f64) -> ParticleField {
		let mut rng = SmallRng::seed_from_u64(1);
		let mut field = ParticleField::new(&mut rng, points.len(), width, height, 0.0, 10.0);
		field.points_mut().clone_from_slice(&points);
		field
	}

	fn point(x: f64, y: f64) -> Point {
		Point {
			x,
			y,
			dx: 0.0,
			dy: 0.0,
			radius: 10.0,
			random_offset: 0.0,
			drift_cooldown_until: f64::NEG_INFINITY,
		}
	}

	/// Cursor that last moved at `now`.
	fn active_mouse(x: f64, y: f64, now: f64) -> MouseTracker {
		let mut mouse = MouseTracker::default();
		mouse.record_move(x, y, now);
		mouse
	}

	#[test]
	fn initialize_fills_both_vectors() {
		let mut rng = SmallRng::seed_from_u64(42);
		let field = ParticleField::new(&mut rng, 50, 800.0, 600.0, 2.0, 25.0);
		assert_eq!(field.len(), 50);
		assert_eq!(field.progress().len(), 50);
		assert!(field.progress().iter().all(|&p| p == NEUTRAL_PROGRESS));
		for p in field.points() {
			assert!((0.0..800.0).contains(&p.x));
			assert!((0.0..600.0).contains(&p.y));
			assert!(p.dx.abs() <= 1.0 && p.dy.abs() <= 1.0);
			assert!((0.0..MAX_PHASE_OFFSET).contains(&p.random_offset));
			assert_eq!(p.radius, 25.0);
		}
	}

	#[test]
	fn reinitialize_replaces_everything() {
		let mut rng = SmallRng::seed_from_u64(3);
		let mut field = ParticleField::new(&mut rng, 10, 100.0, 100.0, 1.0, 5.0);
		field.advance(&active_mouse(0.0, 0.0, 0.0), 0.0, &SimulationConfig::default());
		field.initialize(&mut rng, 0, 100.0, 100.0, 1.0, 5.0);
		assert!(field.is_empty());
		assert!(field.progress().is_empty());
		field.initialize(&mut rng, 4, 100.0, 100.0, 1.0, 5.0);
		assert_eq!(field.progress(), &[NEUTRAL_PROGRESS; 4]);
	}

	#[test]
	fn active_mouse_smooths_progress() {
		let mut field = still_field(vec![point(300.0, 400.0)], 300.0, 400.0);
		// Mouse at the origin: distance equals the diagonal, so t = 1.
		let mouse = active_mouse(0.0, 0.0, 0.0);
		field.advance(&mouse, 0.0, &SimulationConfig::default());
		assert!((field.progress()[0] - 0.525).abs() < 1e-12);
		field.advance(&mouse, 0.1, &SimulationConfig::default());
		assert!((field.progress()[0] - (0.525 + 0.475 * 0.05)).abs() < 1e-12);
	}

	#[test]
	fn idle_mouse_leaves_progress_alone() {
		let mut field = still_field(vec![point(300.0, 400.0)], 300.0, 400.0);
		let mouse = MouseTracker::default();
		field.advance(&mouse, 10.0, &SimulationConfig::default());
		assert_eq!(field.progress()[0], NEUTRAL_PROGRESS);
	}

	#[test]
	fn nearby_points_are_pushed_away() {
		let mut field = still_field(vec![point(100.0, 100.0), point(500.0, 500.0)], 600.0, 800.0);
		let config = SimulationConfig {
			smoothness: 5.0,
			..Default::default()
		};
		let mouse = active_mouse(50.0, 100.0, 0.0);
		field.advance(&mouse, 0.0, &config);

		let pushed = &field.points()[0];
		let t = 50.0 / 1000.0;
		assert!((pushed.x - (100.0 + 5.0 * (1.0 - t))).abs() < 1e-9);
		assert!((pushed.y - 100.0).abs() < 1e-9);

		// Out of range: untouched.
		assert_eq!(field.points()[1].x, 500.0);
	}

	#[test]
	fn idle_drift_respects_cooldown() {
		let mut field = still_field(vec![point(0.0, 0.0)], 1000.0, 1000.0);
		let mouse = MouseTracker::centered(1000.0, 1000.0);
		let config = SimulationConfig::default();
		let step = IDLE_STEP / 2f64.sqrt();

		field.advance(&mouse, 0.0, &config);
		let p = &field.points()[0];
		assert!((p.x - step).abs() < 1e-9 && (p.y - step).abs() < 1e-9);
		assert!(p.is_moving_to_mouse(0.5));

		// Within the cooldown: no second step.
		field.advance(&mouse, 0.5, &config);
		assert!((field.points()[0].x - step).abs() < 1e-9);

		field.advance(&mouse, 1.0, &config);
		assert!((field.points()[0].x - 2.0 * step).abs() < 1e-9);
	}

	#[test]
	fn active_mouse_suppresses_drift() {
		let mut field = still_field(vec![point(0.0, 0.0)], 1000.0, 1000.0);
		let mouse = active_mouse(900.0, 900.0, 0.0);
		field.advance(&mouse, 0.2, &SimulationConfig::default());
		assert_eq!((field.points()[0].x, field.points()[0].y), (0.0, 0.0));
	}

	#[test]
	fn velocity_is_applied() {
		let mut p = point(50.0, 50.0);
		p.dx = 1.5;
		p.dy = -0.5;
		let mut field = still_field(vec![p], 1000.0, 1000.0);
		field.advance(&active_mouse(900.0, 900.0, 0.0), 0.0, &SimulationConfig::default());
		assert_eq!((field.points()[0].x, field.points()[0].y), (51.5, 49.5));
	}

	#[test]
	fn wraps_on_all_four_edges() {
		let (w, h, r) = (200.0, 100.0, 10.0);
		let eps = 1e-6;

		let mut p = point(-r - eps, 50.0);
		wrap(&mut p, w, h);
		assert_eq!(p.x, w + r);

		let mut p = point(w + r + eps, 50.0);
		wrap(&mut p, w, h);
		assert_eq!(p.x, -r);

		let mut p = point(50.0, -r - eps);
		wrap(&mut p, w, h);
		assert_eq!(p.y, h + r);

		let mut p = point(50.0, h + r + eps);
		wrap(&mut p, w, h);
		assert_eq!(p.y, -r);

		// Exactly on the margin stays put.
		let mut p = point(-r, h + r);
		wrap(&mut p, w, h);
		assert_eq!((p.x, p.y), (-r, h + r));
	}

	#[test]
	fn advance_wraps_moving_points() {
		let mut p = point(-9.5, 50.0);
		p.dx = -1.0;
		let mut field = still_field(vec![p], 200.0, 100.0);
		field.advance(&active_mouse(200.0, 100.0, 0.0), 0.0, &SimulationConfig::default());
		assert_eq!(field.points()[0].x, 210.0);
	}

	#[test]
	fn speed_and_radius_setters() {
		let mut rng = SmallRng::seed_from_u64(9);
		let mut field = ParticleField::new(&mut rng, 20, 100.0, 100.0, 0.0, 5.0);
		assert!(field.points().iter().all(|p| p.dx == 0.0 && p.dy == 0.0));
		field.set_speed(&mut rng, 4.0);
		assert!(field.points().iter().any(|p| p.dx != 0.0));
		assert!(field.points().iter().all(|p| p.dx.abs() <= 2.0 && p.dy.abs() <= 2.0));
		field.set_radius(42.0);
		assert!(field.points().iter().all(|p| p.radius == 42.0));
	}

	#[test]
	fn resize_scales_positions() {
		let mut field = still_field(vec![point(50.0, 25.0)], 100.0, 100.0);
		field.resize(200.0, 50.0);
		assert_eq!((field.points()[0].x, field.points()[0].y), (100.0, 12.5));
		assert_eq!((field.width(), field.height()), (200.0, 50.0));
	}

	#[test]
	fn zero_sized_canvas_does_not_panic() {
		let mut rng = SmallRng::seed_from_u64(5);
		let mut field = ParticleField::new(&mut rng, 3, 0.0, 0.0, 1.0, 10.0);
		field.advance(&active_mouse(0.0, 0.0, 0.0), 0.0, &SimulationConfig::default());
		assert_eq!(field.len(), 3);
	}
}
