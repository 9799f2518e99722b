//! Scene (shape stream) types.
//!
//! Responsibilities:
//! - store compositor-agnostic shape descriptions
//! - provide deterministic paint ordering (layer + insertion order)
//!
//! Packing into GPU form lives in `frame`.

mod key;
mod layer;
mod list;
mod shape;

pub use key::SortKey;
pub use layer::Layer;
pub use list::{SceneItem, SceneList};
pub use shape::{Primitive, Shape};
