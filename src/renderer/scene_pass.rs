use crate::gpu::pipeline_helpers;
use crate::gpu::render_context::RenderContext;
use crate::gpu::texture::DEPTH_FORMAT;
use crate::renderer::HDR_FORMAT;
use crate::scene::{mesh, Material, Mesh};

/// Pipeline for textured, point-lit scene geometry, rendered into the
/// offscreen HDR target with depth testing and back-face culling.
pub struct ScenePass {
    pipeline: wgpu::RenderPipeline,
    /// Layout the scene's materials bind their texture/sampler against.
    pub material_layout: wgpu::BindGroupLayout,
}

impl ScenePass {
    pub fn new(
        context: &RenderContext,
        camera_layout: &wgpu::BindGroupLayout,
        lighting_layout: &wgpu::BindGroupLayout,
        model_layout: &wgpu::BindGroupLayout,
    ) -> Self {
        let shader = context
            .device
            .create_shader_module(wgpu::include_wgsl!("../../assets/shaders/scene.wgsl"));

        let material_layout = context
            .device
            .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Material Bind Group Layout"),
                entries: &[
                    pipeline_helpers::texture_2d(0),
                    pipeline_helpers::filtering_sampler(1),
                ],
            });

        let pipeline_layout =
            context
                .device
                .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                    label: Some("Scene Pipeline Layout"),
                    bind_group_layouts: &[
                        camera_layout,
                        lighting_layout,
                        model_layout,
                        &material_layout,
                    ],
                    push_constant_ranges: &[],
                });

        let pipeline = context
            .device
            .create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some("Scene Pipeline"),
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs_main"),
                    buffers: &[mesh::vertex_buffer_layout()],
                    compilation_options: Default::default(),
                },
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some("fs_main"),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: HDR_FORMAT,
                        blend: None,
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                    compilation_options: Default::default(),
                }),
                primitive: wgpu::PrimitiveState {
                    topology: wgpu::PrimitiveTopology::TriangleList,
                    cull_mode: Some(wgpu::Face::Back),
                    ..Default::default()
                },
                depth_stencil: Some(wgpu::DepthStencilState {
                    format: DEPTH_FORMAT,
                    depth_write_enabled: true,
                    depth_compare: wgpu::CompareFunction::Less,
                    stencil: wgpu::StencilState::default(),
                    bias: wgpu::DepthBiasState::default(),
                }),
                multisample: wgpu::MultisampleState::default(),
                multiview: None,
                cache: None,
            });

        Self {
            pipeline,
            material_layout,
        }
    }

    /// Bind the pipeline and the frame-constant groups. Call once per
    /// pass, before any [`draw`](Self::draw).
    pub fn begin(
        &self,
        rp: &mut wgpu::RenderPass<'_>,
        camera_bind_group: &wgpu::BindGroup,
        lighting_bind_group: &wgpu::BindGroup,
    ) {
        rp.set_pipeline(&self.pipeline);
        rp.set_bind_group(0, camera_bind_group, &[]);
        rp.set_bind_group(1, lighting_bind_group, &[]);
    }

    /// Draw one mesh with the model transform at `model_offset` in the
    /// model stack and the given material.
    pub fn draw(
        &self,
        rp: &mut wgpu::RenderPass<'_>,
        model_bind_group: &wgpu::BindGroup,
        model_offset: u32,
        material: &Material,
        mesh: &Mesh,
    ) {
        rp.set_bind_group(2, model_bind_group, &[model_offset]);
        rp.set_bind_group(3, &material.bind_group, &[]);
        rp.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
        rp.draw(0..mesh.vertex_count, 0..1);
    }
}
