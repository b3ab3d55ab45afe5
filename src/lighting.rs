//! Point-light uniform and its GPU binding.

use wgpu::util::DeviceExt;

use crate::gpu::render_context::RenderContext;
use crate::options::LightingOptions;

/// Point-light configuration shared by the scene shader.
/// Layout must match the WGSL struct exactly (80 bytes).
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightingUniform {
    /// Light position in world space.
    pub position: [f32; 3],
    /// Constant attenuation term.
    pub constant: f32,
    /// Ambient color.
    pub ambient: [f32; 3],
    /// Linear attenuation term.
    pub linear: f32,
    /// Diffuse color.
    pub diffuse: [f32; 3],
    /// Quadratic attenuation term.
    pub quadratic: f32,
    /// Specular color.
    pub specular: [f32; 3],
    /// Specular shininess exponent.
    pub shininess: f32,
    /// 1 = Blinn-Phong halfway specular, 0 = classic Phong reflect.
    pub blinn: u32,
    pub _pad: [f32; 3],
}

impl Default for LightingUniform {
    fn default() -> Self {
        Self::from_options(&LightingOptions::default())
    }
}

impl LightingUniform {
    /// Build from the configured light parameters. Position starts at
    /// the orbit's t = 0 point.
    #[must_use]
    pub fn from_options(options: &LightingOptions) -> Self {
        Self {
            position: [options.orbit_radius, options.orbit_height, 0.0],
            constant: options.constant,
            ambient: options.ambient,
            linear: options.linear,
            diffuse: options.diffuse,
            quadratic: options.quadratic,
            specular: options.specular,
            shininess: options.shininess,
            blinn: 0,
            _pad: [0.0; 3],
        }
    }
}

/// Owns the lighting uniform buffer and its bind group.
pub struct Lighting {
    pub uniform: LightingUniform,
    orbit_radius: f32,
    orbit_height: f32,
    pub buffer: wgpu::Buffer,
    pub layout: wgpu::BindGroupLayout,
    pub bind_group: wgpu::BindGroup,
}

impl Lighting {
    pub fn new(context: &RenderContext, options: &LightingOptions) -> Self {
        let uniform = LightingUniform::from_options(options);

        let buffer = context
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Lighting Buffer"),
                contents: bytemuck::cast_slice(&[uniform]),
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            });

        let layout = context
            .device
            .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Lighting Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
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
                label: Some("Lighting Bind Group"),
            });

        Self {
            uniform,
            orbit_radius: options.orbit_radius,
            orbit_height: options.orbit_height,
            buffer,
            layout,
            bind_group,
        }
    }

    /// Advance the light along its circular orbit. `elapsed` is the
    /// scene clock in seconds.
    pub fn orbit(&mut self, elapsed: f32) {
        self.uniform.position = [
            self.orbit_radius * elapsed.cos(),
            self.orbit_height,
            self.orbit_radius * elapsed.sin(),
        ];
    }

    /// Switch between Blinn-Phong and Phong specular models.
    pub fn set_blinn(&mut self, blinn: bool) {
        self.uniform.blinn = u32::from(blinn);
    }

    /// Upload the current uniform values.
    pub fn update_gpu(&self, queue: &wgpu::Queue) {
        queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(&[self.uniform]));
    }
}
