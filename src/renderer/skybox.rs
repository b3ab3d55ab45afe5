use crate::gpu::pipeline_helpers;
use crate::gpu::render_context::RenderContext;
use crate::gpu::texture::{SceneTexture, DEPTH_FORMAT};
use crate::renderer::HDR_FORMAT;
use crate::scene::{mesh, Mesh};

/// Cubemap skybox pass.
///
/// Drawn after the scene geometry with LessEqual depth against the
/// vertex shader's forced w-depth, so it fills exactly the pixels no
/// geometry covered. Uses the rotation-only view-projection from the
/// camera uniform.
pub struct SkyboxPass {
    pipeline: wgpu::RenderPipeline,
    bind_group: wgpu::BindGroup,
}

impl SkyboxPass {
    pub fn new(
        context: &RenderContext,
        camera_layout: &wgpu::BindGroupLayout,
        cubemap: &SceneTexture,
    ) -> Self {
        let shader = context
            .device
            .create_shader_module(wgpu::include_wgsl!("../../assets/shaders/skybox.wgsl"));

        let sky_layout = context
            .device
            .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Skybox Bind Group Layout"),
                entries: &[
                    pipeline_helpers::texture_cube(0),
                    pipeline_helpers::filtering_sampler(1),
                ],
            });

        let sampler = pipeline_helpers::linear_sampler(&context.device, "Skybox Sampler");
        let bind_group = context
            .device
            .create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("Skybox Bind Group"),
                layout: &sky_layout,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: 0,
                        resource: wgpu::BindingResource::TextureView(&cubemap.view),
                    },
                    wgpu::BindGroupEntry {
                        binding: 1,
                        resource: wgpu::BindingResource::Sampler(&sampler),
                    },
                ],
            });

        let pipeline_layout =
            context
                .device
                .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                    label: Some("Skybox Pipeline Layout"),
                    bind_group_layouts: &[camera_layout, &sky_layout],
                    push_constant_ranges: &[],
                });

        let pipeline = context
            .device
            .create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some("Skybox Pipeline"),
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs_main"),
                    buffers: &[mesh::sky_vertex_buffer_layout()],
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
                    // Faces are wound inward; culling stays off like
                    // the rest of the sky-dome convention.
                    cull_mode: None,
                    ..Default::default()
                },
                depth_stencil: Some(wgpu::DepthStencilState {
                    format: DEPTH_FORMAT,
                    depth_write_enabled: false,
                    depth_compare: wgpu::CompareFunction::LessEqual,
                    stencil: wgpu::StencilState::default(),
                    bias: wgpu::DepthBiasState::default(),
                }),
                multisample: wgpu::MultisampleState::default(),
                multiview: None,
                cache: None,
            });

        Self {
            pipeline,
            bind_group,
        }
    }

    /// Draw the skybox. Must come after all depth-writing geometry.
    pub fn draw(
        &self,
        rp: &mut wgpu::RenderPass<'_>,
        camera_bind_group: &wgpu::BindGroup,
        sky_mesh: &Mesh,
    ) {
        rp.set_pipeline(&self.pipeline);
        rp.set_bind_group(0, camera_bind_group, &[]);
        rp.set_bind_group(1, &self.bind_group, &[]);
        rp.set_vertex_buffer(0, sky_mesh.vertex_buffer.slice(..));
        rp.draw(0..sky_mesh.vertex_count, 0..1);
    }
}
