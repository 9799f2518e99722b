//! Per-frame GPU data layout and scene packing.
//!
//! The packed records mirror the WGSL structs byte for byte; layout tables
//! live next to each type. Evaluation of packed frames is in `sdf`, upload
//! and drawing in `render`.

mod packet;

pub use packet::{
    CircleData, FrameConstants, FramePacket, GpuMat3, RectData, ShapeData, KIND_CIRCLE, KIND_RECT,
};

pub(crate) use packet::mat3_from_gpu;
