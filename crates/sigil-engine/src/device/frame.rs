/// A single acquired frame: surface texture, render view and encoder.
///
/// Short-lived. Holding the surface texture past present blocks acquisition
/// of subsequent frames, so a `GpuFrame` must go back through
/// [`Gpu::submit`](super::Gpu::submit) promptly.
pub struct GpuFrame {
    pub surface_texture: wgpu::SurfaceTexture,
    pub view: wgpu::TextureView,
    pub encoder: wgpu::CommandEncoder,
}
