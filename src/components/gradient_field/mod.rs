//! Mouse-reactive particle gradient.
//!
//! Renders a field of large, softly shadowed discs on an HTML canvas:
//! - Each disc drifts with its own velocity and wraps around the edges
//! - Discs near the cursor are pushed away; while the cursor rests they creep
//!   toward it
//! - Each disc's color slides along a cyclic palette as the cursor moves
//! - Parameters and palette load from the page and the URL query string
//!
//! # Example
//!
//! ```ignore
//! use gradient_field::{GradientCanvas, Settings};
//!
//! let mut settings = Settings::default();
//! settings.config.count = 60;
//!
//! view! { <GradientCanvas settings=settings /> }
//! ```

pub mod color;
mod component;
pub mod config;
pub mod field;
pub mod mouse;
pub mod palette;
pub mod render;
mod state;

pub use color::{Color, ColorError};
pub use component::{GradientCanvas, GradientStateHandle, listen_mouse_moves};
pub use config::{Adjustments, QuerySource, Settings, SimulationConfig, embed_code};
pub use field::{ParticleField, Point};
pub use mouse::MouseTracker;
pub use palette::{Palette, PaletteError};
pub use render::{CanvasSurface, Surface};
pub use state::GradientState;
