//! Signed distance evaluation.
//!
//! [`primitive`] holds the distance functions shared with the shader in
//! `render/shaders/sdf.wgsl`. [`composite`] and [`composite_aa`] walk a packed
//! frame exactly like the two fragment entry points, so scene output can be
//! checked on the CPU pixel by pixel.

mod eval;
pub mod primitive;

pub use eval::{
    composite, composite_aa, render_to, render_to_aa, PixelFootprint,
};
