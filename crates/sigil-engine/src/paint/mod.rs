//! Paint model shared between the scene and the compositor.
//!
//! Scope:
//! - color representation (straight RGBA)
//!
//! Geometry types remain in `coords`.

pub mod color;

pub use color::Color;
