use bytemuck::{Pod, Zeroable};

use crate::coords::{Camera2, Mat3};
use crate::paint::Color;
use crate::scene::{Primitive, SceneList};

/// Shape kind discriminants shared with the shader.
pub const KIND_CIRCLE: u32 = 0;
pub const KIND_RECT: u32 = 1;

/// `mat3x3<f32>` in WGSL buffer layout: three vec4-padded columns.
pub type GpuMat3 = [[f32; 4]; 3];

fn gpu_mat3(m: &Mat3) -> GpuMat3 {
    [
        [m.m[0][0], m.m[1][0], m.m[2][0], 0.0],
        [m.m[0][1], m.m[1][1], m.m[2][1], 0.0],
        [m.m[0][2], m.m[1][2], m.m[2][2], 0.0],
    ]
}

pub(crate) fn mat3_from_gpu(g: &GpuMat3) -> Mat3 {
    Mat3 {
        m: [
            [g[0][0], g[1][0], g[2][0]],
            [g[0][1], g[1][1], g[2][1]],
            [g[0][2], g[1][2], g[2][2]],
        ],
    }
}

/// Packed shape record (128 bytes, `array<Shape>` stride in the shader):
///
///  offset   0  inv_transform  mat3x3<f32>  scene -> local
///  offset  48  transform      mat3x3<f32>  local -> scene
///  offset  96  color          vec4<f32>
///  offset 112  kind           u32
///  offset 116  payload        u32          index into the kind's array
///  offset 120  layer          u32          grouping hint, not consulted
///  offset 124  (padding)
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub struct ShapeData {
    pub inv_transform: GpuMat3,
    pub transform: GpuMat3,
    pub color: [f32; 4],
    pub kind: u32,
    pub payload: u32,
    pub layer: u32,
    pub _pad: u32,
}

/// Circle payload record (4 bytes).
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub struct CircleData {
    pub radius: f32,
}

/// Rectangle payload record (8 bytes).
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub struct RectData {
    pub half_extent: [f32; 2],
}

/// Frame uniform (80 bytes):
///
///  offset   0  camera       mat3x3<f32>  clip -> scene
///  offset  48  background   vec4<f32>
///  offset  64  shape_count  u32
///  offset  68  (padding)
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub struct FrameConstants {
    pub camera: GpuMat3,
    pub background: [f32; 4],
    pub shape_count: u32,
    pub _pad: [u32; 3],
}

/// One frame's compositor input: packed shape arrays plus frame constants.
///
/// Built from scratch each frame; the compositor keeps no cross-frame state
/// beyond GPU buffer capacity.
#[derive(Debug, Clone)]
pub struct FramePacket {
    pub shapes: Vec<ShapeData>,
    pub circles: Vec<CircleData>,
    pub rects: Vec<RectData>,
    pub constants: FrameConstants,
}

impl FramePacket {
    /// Packs a scene into GPU form.
    ///
    /// Shapes are emitted front-to-back (the per-pixel scan keeps the first
    /// hit), each carrying its forward transform and the derived inverse.
    /// Shapes whose transform is singular have no usable inverse and are
    /// skipped with a warning.
    pub fn pack(scene: &mut SceneList, camera: &Camera2, aspect: f32, background: Color) -> Self {
        let mut shapes = Vec::with_capacity(scene.len());
        let mut circles = Vec::new();
        let mut rects = Vec::new();

        for shape in scene.iter_front_to_back() {
            let Some(inverse) = shape.transform.inverse() else {
                log::warn!("skipping shape with singular transform: {:?}", shape.primitive);
                continue;
            };

            let (kind, payload) = match shape.primitive {
                Primitive::Circle { radius } => {
                    let payload = circles.len() as u32;
                    circles.push(CircleData { radius });
                    (KIND_CIRCLE, payload)
                }
                Primitive::Rect { half_extent } => {
                    let payload = rects.len() as u32;
                    rects.push(RectData {
                        half_extent: [half_extent.x, half_extent.y],
                    });
                    (KIND_RECT, payload)
                }
            };

            shapes.push(ShapeData {
                inv_transform: gpu_mat3(&inverse),
                transform: gpu_mat3(&shape.transform),
                color: shape.color.to_array(),
                kind,
                payload,
                layer: shape.layer.0 as u32,
                _pad: 0,
            });
        }

        let constants = FrameConstants {
            camera: gpu_mat3(&camera.scene_from_clip(aspect)),
            background: background.to_array(),
            shape_count: shapes.len() as u32,
            _pad: [0; 3],
        };

        Self {
            shapes,
            circles,
            rects,
            constants,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Vec2;
    use crate::scene::{Layer, Shape};

    fn sample_scene() -> SceneList {
        let mut scene = SceneList::new();
        scene.push(Shape::circle(1.0).with_color(Color::opaque(1.0, 0.0, 0.0)));
        scene.push(Shape::rect(2.0, 4.0).with_color(Color::opaque(0.0, 1.0, 0.0)));
        scene.push(
            Shape::circle(3.0)
                .with_layer(Layer::new(5))
                .with_color(Color::opaque(0.0, 0.0, 1.0)),
        );
        scene
    }

    fn pack(scene: &mut SceneList) -> FramePacket {
        FramePacket::pack(scene, &Camera2::new().with_fov_y(2.0), 1.0, Color::BLACK)
    }

    // ── layout ─────────────────────────────────────────────────────────────

    #[test]
    fn packed_sizes_match_shader_strides() {
        assert_eq!(core::mem::size_of::<ShapeData>(), 128);
        assert_eq!(core::mem::size_of::<CircleData>(), 4);
        assert_eq!(core::mem::size_of::<RectData>(), 8);
        assert_eq!(core::mem::size_of::<FrameConstants>(), 80);
    }

    #[test]
    fn gpu_mat3_round_trips() {
        let m = Mat3::translate(1.0, 2.0) * Mat3::rotate(0.3) * Mat3::scale(4.0, 0.25);
        assert_eq!(mat3_from_gpu(&gpu_mat3(&m)), m);
    }

    // ── packing ────────────────────────────────────────────────────────────

    #[test]
    fn shapes_are_packed_front_to_back() {
        let packet = pack(&mut sample_scene());

        assert_eq!(packet.constants.shape_count, 3);
        // Layer 5 circle first, then the layer-0 pair latest-first.
        assert_eq!(packet.shapes[0].color, [0.0, 0.0, 1.0, 1.0]);
        assert_eq!(packet.shapes[1].color, [0.0, 1.0, 0.0, 1.0]);
        assert_eq!(packet.shapes[2].color, [1.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn payload_indices_count_per_kind() {
        let packet = pack(&mut sample_scene());

        assert_eq!(packet.shapes[0].kind, KIND_CIRCLE);
        assert_eq!(packet.shapes[0].payload, 0);
        assert_eq!(packet.shapes[1].kind, KIND_RECT);
        assert_eq!(packet.shapes[1].payload, 0);
        assert_eq!(packet.shapes[2].kind, KIND_CIRCLE);
        assert_eq!(packet.shapes[2].payload, 1);

        assert_eq!(packet.circles.len(), 2);
        assert_eq!(packet.rects.len(), 1);
        assert_eq!(packet.circles[0].radius, 3.0);
        assert_eq!(packet.circles[1].radius, 1.0);
        assert_eq!(packet.rects[0].half_extent, [1.0, 2.0]);
    }

    #[test]
    fn inverse_transform_is_the_true_inverse() {
        let mut scene = SceneList::new();
        scene.push(
            Shape::circle(1.0)
                .with_transform(Mat3::translate(5.0, -2.0) * Mat3::rotate(1.1) * Mat3::scale(3.0, 3.0)),
        );
        let packet = pack(&mut scene);

        let fwd = mat3_from_gpu(&packet.shapes[0].transform);
        let inv = mat3_from_gpu(&packet.shapes[0].inv_transform);
        let p = Vec2::new(0.3, -0.6);
        let rt = inv.transform_point(fwd.transform_point(p));
        assert!((rt.x - p.x).abs() < 1e-4 && (rt.y - p.y).abs() < 1e-4);
    }

    #[test]
    fn singular_transforms_are_skipped() {
        let mut scene = SceneList::new();
        scene.push(Shape::circle(1.0).with_transform(Mat3::scale(0.0, 1.0)));
        scene.push(Shape::circle(2.0));
        let packet = pack(&mut scene);

        assert_eq!(packet.constants.shape_count, 1);
        assert_eq!(packet.shapes.len(), 1);
        assert_eq!(packet.circles.len(), 1);
        assert_eq!(packet.circles[0].radius, 2.0);
    }

    #[test]
    fn constants_carry_camera_and_background() {
        let mut scene = SceneList::new();
        let camera = Camera2::new().with_fov_y(10.0);
        let packet = FramePacket::pack(&mut scene, &camera, 2.0, Color::opaque(0.1, 0.2, 0.3));

        assert_eq!(packet.constants.shape_count, 0);
        assert_eq!(packet.constants.background, [0.1, 0.2, 0.3, 1.0]);
        assert_eq!(
            mat3_from_gpu(&packet.constants.camera),
            camera.scene_from_clip(2.0)
        );
    }
}
