//! Coordinate and geometry types shared across the engine.
//!
//! Canonical spaces:
//! - Scene space: world units, origin wherever the producer puts it, +Y up.
//! - Local space: per-shape units after applying the shape's inverse transform.
//! - Clip space: [-1, 1] square covering the target.
//!
//! The camera matrix maps clip to scene; shape inverse transforms map scene
//! to local.

mod camera;
mod mat3;
mod vec2;
mod viewport;

pub use camera::{Camera2, Fov};
pub use mat3::Mat3;
pub use vec2::Vec2;
pub use viewport::Viewport;
