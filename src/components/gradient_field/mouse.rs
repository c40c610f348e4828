//! Cursor tracking with an idle window.
//!
//! The cursor counts as active for one second after its last movement.
//! Instead of a cancel-and-reschedule timer the tracker keeps the time of
//! the last move and compares it against the frame clock.

/// How long after the last movement the cursor still counts as active (s).
pub const IDLE_AFTER: f64 = 1.0;

/// Last known cursor position and when it last moved.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MouseTracker {
	/// Canvas-space position (px).
	pub x: f64,
	/// Canvas-space position (px).
	pub y: f64,
	last_move: Option<f64>,
}

impl MouseTracker {
	/// An idle cursor parked at the center of the canvas.
	pub fn centered(width: f64, height: f64) -> Self {
		let mut mouse = Self::default();
		mouse.recenter(width, height);
		mouse
	}

	/// Move the cursor to the center of a `width` x `height` canvas. The idle
	/// window is left alone.
	pub fn recenter(&mut self, width: f64, height: f64) {
		self.x = width / 2.0;
		self.y = height / 2.0;
	}

	/// Record a movement event at `now` (seconds).
	pub fn record_move(&mut self, x: f64, y: f64, now: f64) {
		self.x = x;
		self.y = y;
		self.last_move = Some(now);
	}

	/// Whether the cursor moved less than [`IDLE_AFTER`] before `now`.
	pub fn is_active(&self, now: f64) -> bool {
		self.last_move
			.is_some_and(|moved_at| now - moved_at < IDLE_AFTER)
	}

	/// Time of the last recorded move (s).
	pub fn last_move(&self) -> Option<f64> {
		self.last_move
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn starts_idle_at_center() {
		let mouse = MouseTracker::centered(800.0, 600.0);
		assert_eq!((mouse.x, mouse.y), (400.0, 300.0));
		assert!(!mouse.is_active(0.0));
	}

	#[test]
	fn recenter_keeps_idle_window() {
		let mut mouse = MouseTracker::centered(100.0, 50.0);
		mouse.record_move(3.0, 4.0, 1.0);
		mouse.recenter(300.0, 200.0);
		assert_eq!((mouse.x, mouse.y), (150.0, 100.0));
		assert!(mouse.is_active(1.5));
	}

	#[test]
	fn goes_idle_one_second_after_last_move() {
		let mut mouse = MouseTracker::default();
		mouse.record_move(10.0, 20.0, 5.0);
		assert!(mouse.is_active(5.0));
		assert!(mouse.is_active(5.99));
		assert!(!mouse.is_active(6.0));

		// Another move restarts the window.
		mouse.record_move(11.0, 21.0, 5.5);
		assert!(mouse.is_active(6.2));
		assert!(!mouse.is_active(6.6));
		assert_eq!(mouse.last_move(), Some(5.5));
	}
}
