use crate::coords::Camera2;
use crate::frame::{CircleData, FrameConstants, FramePacket, RectData, ShapeData};
use crate::paint::Color;
use crate::scene::SceneList;

use super::{RenderCtx, RenderTarget};

/// Buffers never shrink below this many entries.
const MIN_CAPACITY: usize = 16;

/// Fragment-stage edge handling.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum AaMode {
    /// Hard inside/outside test (`fs_main`).
    Off,
    /// Screen-space derivative edge handling (`fs_main_aa`).
    #[default]
    Derivative,
}

impl AaMode {
    fn entry_point(self) -> &'static str {
        match self {
            AaMode::Off => "fs_main",
            AaMode::Derivative => "fs_main_aa",
        }
    }
}

/// Full-screen SDF scene compositor.
///
/// Packs a [`SceneList`] into storage buffers each frame and draws one
/// viewport-covering triangle; every fragment walks the packed shape list in
/// paint order and keeps the first signed-distance hit (`shaders/sdf.wgsl`).
///
/// GPU resources are created lazily and kept across frames. The pipeline is
/// rebuilt when the surface format or [`AaMode`] changes; shape buffers grow
/// in power-of-two steps and never shrink.
#[derive(Default)]
pub struct SceneCompositor {
    aa_mode: AaMode,

    pipeline_key: Option<(wgpu::TextureFormat, AaMode)>,
    pipeline: Option<wgpu::RenderPipeline>,

    bind_group_layout: Option<wgpu::BindGroupLayout>,
    bind_group: Option<wgpu::BindGroup>,

    constants_ubo: Option<wgpu::Buffer>,
    shapes_ssbo: Option<wgpu::Buffer>,
    shapes_capacity: usize,
    circles_ssbo: Option<wgpu::Buffer>,
    circles_capacity: usize,
    rects_ssbo: Option<wgpu::Buffer>,
    rects_capacity: usize,
}

impl SceneCompositor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_aa_mode(mut self, mode: AaMode) -> Self {
        self.set_aa_mode(mode);
        self
    }

    /// Switches edge handling. Takes effect on the next frame; the pipeline
    /// is rebuilt lazily.
    pub fn set_aa_mode(&mut self, mode: AaMode) {
        self.aa_mode = mode;
    }

    pub fn aa_mode(&self) -> AaMode {
        self.aa_mode
    }

    /// Packs `scene` under `camera` and draws it over the whole target.
    ///
    /// The pass clears to `background`; an empty scene still clears.
    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        scene: &mut SceneList,
        camera: &Camera2,
        background: Color,
    ) {
        let packet = FramePacket::pack(scene, camera, ctx.viewport.aspect(), background);
        self.render_packet(ctx, target, &packet);
    }

    /// Draws an already-packed frame.
    pub fn render_packet(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        packet: &FramePacket,
    ) {
        self.ensure_pipeline(ctx);
        self.ensure_buffers(ctx, packet);
        self.ensure_bind_group(ctx);
        self.write_buffers(ctx, packet);

        let [r, g, b, a] = packet.constants.background;
        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("sigil composite pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color {
                        r: r as f64,
                        g: g as f64,
                        b: b as f64,
                        a: a as f64,
                    }),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        // Empty scenes keep the cleared background; no draw is recorded.
        if packet.constants.shape_count == 0 {
            return;
        }

        let (Some(pipeline), Some(bind_group)) =
            (self.pipeline.as_ref(), self.bind_group.as_ref())
        else {
            return;
        };

        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(0, bind_group, &[]);
        rpass.draw(0..3, 0..1);
    }

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        let key = (ctx.surface_format, self.aa_mode);
        if self.pipeline.is_some() && self.pipeline_key == Some(key) {
            return;
        }

        log::debug!("building composite pipeline ({:?}, {:?})", key.0, key.1);

        let shader = ctx
            .device
            .create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some("sigil sdf shader"),
                source: wgpu::ShaderSource::Wgsl(include_str!("shaders/sdf.wgsl").into()),
            });

        let bind_group_layout =
            ctx.device
                .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                    label: Some("sigil composite bgl"),
                    entries: &[
                        // Frame constants feed both the vertex camera mapping
                        // and the fragment scan bound.
                        wgpu::BindGroupLayoutEntry {
                            binding: 0,
                            visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                            ty: wgpu::BindingType::Buffer {
                                ty: wgpu::BufferBindingType::Uniform,
                                has_dynamic_offset: false,
                                min_binding_size: std::num::NonZeroU64::new(
                                    std::mem::size_of::<FrameConstants>() as u64,
                                ),
                            },
                            count: None,
                        },
                        storage_entry(1),
                        storage_entry(2),
                        storage_entry(3),
                    ],
                });

        let pipeline_layout =
            ctx.device
                .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                    label: Some("sigil composite pipeline layout"),
                    bind_group_layouts: &[&bind_group_layout],
                    immediate_size: 0,
                });

        let pipeline = ctx
            .device
            .create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some("sigil composite pipeline"),
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs_main"),
                    compilation_options: Default::default(),
                    buffers: &[],
                },
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some(self.aa_mode.entry_point()),
                    compilation_options: Default::default(),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: ctx.surface_format,
                        blend: None,
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                }),
                primitive: wgpu::PrimitiveState {
                    topology: wgpu::PrimitiveTopology::TriangleList,
                    strip_index_format: None,
                    front_face: wgpu::FrontFace::Ccw,
                    cull_mode: None,
                    polygon_mode: wgpu::PolygonMode::Fill,
                    unclipped_depth: false,
                    conservative: false,
                },
                depth_stencil: None,
                multisample: wgpu::MultisampleState::default(),
                multiview_mask: None,
                cache: None,
            });

        self.pipeline_key = Some(key);
        self.pipeline = Some(pipeline);
        self.bind_group_layout = Some(bind_group_layout);
        self.bind_group = None;
    }

    fn ensure_buffers(&mut self, ctx: &RenderCtx<'_>, packet: &FramePacket) {
        let mut rebind = false;

        if self.constants_ubo.is_none() {
            self.constants_ubo = Some(ctx.device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("sigil frame constants"),
                size: std::mem::size_of::<FrameConstants>() as u64,
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            }));
            rebind = true;
        }

        rebind |= grow_storage(
            ctx,
            "sigil shape list",
            &mut self.shapes_ssbo,
            &mut self.shapes_capacity,
            packet.shapes.len(),
            std::mem::size_of::<ShapeData>(),
        );
        rebind |= grow_storage(
            ctx,
            "sigil circle payloads",
            &mut self.circles_ssbo,
            &mut self.circles_capacity,
            packet.circles.len(),
            std::mem::size_of::<CircleData>(),
        );
        rebind |= grow_storage(
            ctx,
            "sigil rect payloads",
            &mut self.rects_ssbo,
            &mut self.rects_capacity,
            packet.rects.len(),
            std::mem::size_of::<RectData>(),
        );

        if rebind {
            self.bind_group = None;
        }
    }

    fn ensure_bind_group(&mut self, ctx: &RenderCtx<'_>) {
        if self.bind_group.is_some() {
            return;
        }

        let (Some(layout), Some(constants), Some(shapes), Some(circles), Some(rects)) = (
            self.bind_group_layout.as_ref(),
            self.constants_ubo.as_ref(),
            self.shapes_ssbo.as_ref(),
            self.circles_ssbo.as_ref(),
            self.rects_ssbo.as_ref(),
        ) else {
            return;
        };

        self.bind_group = Some(ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("sigil composite bind group"),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: constants.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: shapes.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: circles.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 3,
                    resource: rects.as_entire_binding(),
                },
            ],
        }));
    }

    fn write_buffers(&self, ctx: &RenderCtx<'_>, packet: &FramePacket) {
        if let Some(ubo) = self.constants_ubo.as_ref() {
            ctx.queue
                .write_buffer(ubo, 0, bytemuck::bytes_of(&packet.constants));
        }
        if let Some(ssbo) = self.shapes_ssbo.as_ref()
            && !packet.shapes.is_empty()
        {
            ctx.queue
                .write_buffer(ssbo, 0, bytemuck::cast_slice(&packet.shapes));
        }
        if let Some(ssbo) = self.circles_ssbo.as_ref()
            && !packet.circles.is_empty()
        {
            ctx.queue
                .write_buffer(ssbo, 0, bytemuck::cast_slice(&packet.circles));
        }
        if let Some(ssbo) = self.rects_ssbo.as_ref()
            && !packet.rects.is_empty()
        {
            ctx.queue
                .write_buffer(ssbo, 0, bytemuck::cast_slice(&packet.rects));
        }
    }
}

fn storage_entry(binding: u32) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Storage { read_only: true },
            has_dynamic_offset: false,
            min_binding_size: None,
        },
        count: None,
    }
}

/// Recreates `buffer` when `required` entries exceed its capacity, growing in
/// power-of-two steps with a [`MIN_CAPACITY`] floor. Returns true when a new
/// buffer was made and the bind group must be rebuilt.
fn grow_storage(
    ctx: &RenderCtx<'_>,
    label: &'static str,
    buffer: &mut Option<wgpu::Buffer>,
    capacity: &mut usize,
    required: usize,
    stride: usize,
) -> bool {
    if buffer.is_some() && required <= *capacity {
        return false;
    }

    let new_capacity = required.next_power_of_two().max(MIN_CAPACITY);
    log::trace!("growing {label} to {new_capacity} entries");

    *buffer = Some(ctx.device.create_buffer(&wgpu::BufferDescriptor {
        label: Some(label),
        size: (new_capacity * stride) as u64,
        usage: wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    }));
    *capacity = new_capacity;
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aa_mode_selects_the_entry_point() {
        assert_eq!(AaMode::Off.entry_point(), "fs_main");
        assert_eq!(AaMode::Derivative.entry_point(), "fs_main_aa");
        assert_eq!(AaMode::default(), AaMode::Derivative);
    }
}
