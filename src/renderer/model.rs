use glam::Mat4;

use crate::gpu::render_context::RenderContext;

/// Maximum number of per-frame model transforms.
pub const MAX_MODELS: u32 = 16;

/// Uniform alignment required for dynamic offsets.
const STRIDE: u64 = 256;

/// One uniform buffer holding every model matrix drawn this frame,
/// bound with a dynamic offset per draw call.
///
/// All slots are written before the frame's command buffer is
/// submitted, so a single buffer serves every draw without per-draw
/// bind groups.
pub struct ModelStack {
    buffer: wgpu::Buffer,
    pub layout: wgpu::BindGroupLayout,
    pub bind_group: wgpu::BindGroup,
}

impl ModelStack {
    pub fn new(context: &RenderContext) -> Self {
        let buffer = context.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Model Stack Buffer"),
            size: u64::from(MAX_MODELS) * STRIDE,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let layout = context
            .device
            .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Model Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: true,
                        min_binding_size: wgpu::BufferSize::new(
                            std::mem::size_of::<[[f32; 4]; 4]>() as u64,
                        ),
                    },
                    count: None,
                }],
            });

        let bind_group = context
            .device
            .create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("Model Bind Group"),
                layout: &layout,
                entries: &[wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                        buffer: &buffer,
                        offset: 0,
                        size: wgpu::BufferSize::new(std::mem::size_of::<[[f32; 4]; 4]>() as u64),
                    }),
                }],
            });

        Self {
            buffer,
            layout,
            bind_group,
        }
    }

    /// Write the model matrix for slot `index`. Slots beyond
    /// [`MAX_MODELS`] are ignored with a debug assertion.
    pub fn write(&self, queue: &wgpu::Queue, index: u32, model: Mat4) {
        debug_assert!(index < MAX_MODELS);
        if index >= MAX_MODELS {
            return;
        }
        queue.write_buffer(
            &self.buffer,
            u64::from(index) * STRIDE,
            bytemuck::cast_slice(&[model.to_cols_array_2d()]),
        );
    }

    /// Dynamic offset for slot `index`.
    #[must_use]
    pub fn offset(index: u32) -> u32 {
        index * STRIDE as u32
    }
}
