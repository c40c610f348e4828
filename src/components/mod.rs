//! UI components.

pub mod gradient_field;
