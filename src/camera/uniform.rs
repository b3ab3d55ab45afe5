use glam::{Mat3, Mat4};
use wgpu::util::DeviceExt;

use crate::camera::fly::FlyCamera;
use crate::gpu::render_context::RenderContext;

/// GPU uniform holding the camera transforms and world position.
///
/// `sky_view_proj` is the view-projection with the translation stripped
/// from the view matrix, so the skybox stays centered on the eye.
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    /// Combined view-projection matrix.
    pub view_proj: [[f32; 4]; 4],
    /// Rotation-only view-projection for the skybox pass.
    pub sky_view_proj: [[f32; 4]; 4],
    /// Camera world-space position, for specular lighting.
    pub position: [f32; 3],
    /// Padding for GPU alignment.
    pub(crate) _pad: f32,
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self {
            view_proj: Mat4::IDENTITY.to_cols_array_2d(),
            sky_view_proj: Mat4::IDENTITY.to_cols_array_2d(),
            position: [0.0; 3],
            _pad: 0.0,
        }
    }
}

impl CameraUniform {
    /// Refresh all fields from the camera's current state.
    pub fn update(&mut self, camera: &FlyCamera, aspect: f32) {
        let view = camera.view_matrix();
        let proj = camera.projection_matrix(aspect);
        let rotation_only = Mat4::from_mat3(Mat3::from_mat4(view));
        self.view_proj = (proj * view).to_cols_array_2d();
        self.sky_view_proj = (proj * rotation_only).to_cols_array_2d();
        self.position = camera.position.to_array();
    }
}

/// Owns the camera uniform buffer and its bind group.
pub struct CameraBinding {
    pub uniform: CameraUniform,
    pub buffer: wgpu::Buffer,
    pub layout: wgpu::BindGroupLayout,
    pub bind_group: wgpu::BindGroup,
}

impl CameraBinding {
    pub fn new(context: &RenderContext) -> Self {
        let uniform = CameraUniform::default();

        let buffer = context
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Camera Buffer"),
                contents: bytemuck::cast_slice(&[uniform]),
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            });

        let layout = context
            .device
            .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Camera Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            });

        let bind_group = context
            .device
            .create_bind_group(&wgpu::BindGroupDescriptor {
                layout: &layout,
                entries: &[wgpu::BindGroupEntry {
                    binding: 0,
                    resource: buffer.as_entire_binding(),
                }],
                label: Some("Camera Bind Group"),
            });

        Self {
            uniform,
            buffer,
            layout,
            bind_group,
        }
    }

    /// Recompute the uniform from the camera and upload it.
    pub fn update_gpu(&mut self, queue: &wgpu::Queue, camera: &FlyCamera, aspect: f32) {
        self.uniform.update(camera, aspect);
        queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(&[self.uniform]));
    }
}
