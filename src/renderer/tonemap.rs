//! Tonemap composite pass.
//!
//! Scene geometry and skybox render into an Rgba16Float offscreen
//! target; this pass maps it to the swapchain, either through an
//! exposure operator (HDR on) or as a passthrough (HDR off).

use wgpu::util::DeviceExt;

use crate::gpu::pipeline_helpers;
use crate::gpu::render_context::RenderContext;
use crate::gpu::texture::RenderTarget;
use crate::renderer::HDR_FORMAT;

/// Parameters for the tonemap operator.
/// Layout must match the WGSL struct exactly (16 bytes).
#[repr(C)]
#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct TonemapParams {
    /// Exposure applied before the curve.
    pub exposure: f32,
    /// 1 = exposure tonemap, 0 = passthrough.
    pub hdr_enabled: u32,
    pub _pad: [f32; 2],
}

impl Default for TonemapParams {
    fn default() -> Self {
        Self {
            exposure: 1.0,
            hdr_enabled: 1,
            _pad: [0.0; 2],
        }
    }
}

/// Owns the offscreen HDR color target and the fullscreen composite
/// pipeline that resolves it to the swapchain.
pub struct TonemapPass {
    pipeline: wgpu::RenderPipeline,
    layout: wgpu::BindGroupLayout,
    bind_group: wgpu::BindGroup,
    sampler: wgpu::Sampler,
    /// The target the scene pass renders into.
    pub hdr_target: RenderTarget,
    pub params: TonemapParams,
    params_buffer: wgpu::Buffer,
}

impl TonemapPass {
    pub fn new(context: &RenderContext) -> Self {
        let hdr_target = RenderTarget::new(
            &context.device,
            "HDR Color Target",
            context.config.width,
            context.config.height,
            HDR_FORMAT,
        );

        let sampler = pipeline_helpers::linear_sampler(&context.device, "Tonemap Sampler");

        let params = TonemapParams::default();
        let params_buffer = context
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Tonemap Params Buffer"),
                contents: bytemuck::cast_slice(&[params]),
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            });

        let layout = context
            .device
            .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Tonemap Bind Group Layout"),
                entries: &[
                    pipeline_helpers::texture_2d(0),
                    pipeline_helpers::filtering_sampler(1),
                    pipeline_helpers::uniform_buffer(2),
                ],
            });

        let bind_group =
            Self::create_bind_group(context, &layout, &hdr_target, &sampler, &params_buffer);

        let shader = context
            .device
            .create_shader_module(wgpu::include_wgsl!("../../assets/shaders/tonemap.wgsl"));
        let pipeline = pipeline_helpers::create_screen_space_pipeline(
            &context.device,
            "Tonemap",
            &shader,
            context.format(),
            &[&layout],
        );

        Self {
            pipeline,
            layout,
            bind_group,
            sampler,
            hdr_target,
            params,
            params_buffer,
        }
    }

    fn create_bind_group(
        context: &RenderContext,
        layout: &wgpu::BindGroupLayout,
        hdr_target: &RenderTarget,
        sampler: &wgpu::Sampler,
        params_buffer: &wgpu::Buffer,
    ) -> wgpu::BindGroup {
        context
            .device
            .create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("Tonemap Bind Group"),
                layout,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: 0,
                        resource: wgpu::BindingResource::TextureView(&hdr_target.view),
                    },
                    wgpu::BindGroupEntry {
                        binding: 1,
                        resource: wgpu::BindingResource::Sampler(sampler),
                    },
                    wgpu::BindGroupEntry {
                        binding: 2,
                        resource: params_buffer.as_entire_binding(),
                    },
                ],
            })
    }

    /// Recreate the offscreen target at the new surface size.
    pub fn resize(&mut self, context: &RenderContext) {
        self.hdr_target = RenderTarget::new(
            &context.device,
            "HDR Color Target",
            context.config.width,
            context.config.height,
            HDR_FORMAT,
        );
        self.bind_group = Self::create_bind_group(
            context,
            &self.layout,
            &self.hdr_target,
            &self.sampler,
            &self.params_buffer,
        );
    }

    /// Upload the current parameter values.
    pub fn update_gpu(&self, queue: &wgpu::Queue) {
        queue.write_buffer(
            &self.params_buffer,
            0,
            bytemuck::cast_slice(&[self.params]),
        );
    }

    /// Resolve the HDR target into the given swapchain view.
    pub fn render(&self, encoder: &mut wgpu::CommandEncoder, surface_view: &wgpu::TextureView) {
        let mut rp = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("tonemap pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: surface_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            ..Default::default()
        });
        rp.set_pipeline(&self.pipeline);
        rp.set_bind_group(0, &self.bind_group, &[]);
        rp.draw(0..3, 0..1);
    }
}
