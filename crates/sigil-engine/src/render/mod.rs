//! GPU rendering subsystem.
//!
//! The compositor consumes `scene` lists and issues GPU commands via wgpu,
//! owning its own resources (pipeline, buffers, bind group).
//!
//! Convention:
//! - Shapes live in scene units (+Y up); the camera maps clip space to scene
//!   space in the vertex stage.
//! - Coverage is decided per fragment from signed distances, not geometry.

mod compositor;
mod ctx;

pub use compositor::{AaMode, SceneCompositor};
pub use ctx::{RenderCtx, RenderTarget};
