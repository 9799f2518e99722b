//! Sigil engine crate.
//!
//! A GPU-resident 2D shape compositor: scenes of transformed circles and
//! rects are packed into storage buffers and resolved per pixel by signed
//! distance, front to back. The crate also owns the platform + GPU runtime
//! pieces (window loop, device, frame pacing) used to put that image on
//! screen, and a CPU twin of the shader for tests and offline evaluation.

pub mod device;
pub mod window;
pub mod time;
pub mod core;

pub mod logging;
pub mod coords;
pub mod paint;
pub mod scene;
pub mod frame;
pub mod sdf;
pub mod render;
