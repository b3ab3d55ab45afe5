//! Static scene content: meshes, procedural textures, and their
//! material bind groups.
//!
//! There is no scene graph. What gets drawn where is decided inline in
//! the engine's render routine; this module only owns the GPU
//! resources those draws reference.

/// Mesh vertex types and procedural mesh generators.
pub mod mesh;

pub use mesh::{Mesh, SkyVertex, Vertex};

use crate::gpu::pipeline_helpers;
use crate::gpu::render_context::RenderContext;
use crate::gpu::texture::{self, SceneTexture};

/// A texture plus the bind group the scene pass samples it through.
pub struct Material {
    _texture: SceneTexture,
    pub bind_group: wgpu::BindGroup,
}

impl Material {
    fn new(
        context: &RenderContext,
        label: &str,
        layout: &wgpu::BindGroupLayout,
        texture: SceneTexture,
        sampler: &wgpu::Sampler,
    ) -> Self {
        let bind_group = context
            .device
            .create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some(label),
                layout,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: 0,
                        resource: wgpu::BindingResource::TextureView(&texture.view),
                    },
                    wgpu::BindGroupEntry {
                        binding: 1,
                        resource: wgpu::BindingResource::Sampler(sampler),
                    },
                ],
            });
        Self {
            _texture: texture,
            bind_group,
        }
    }
}

/// All GPU-resident scene content, created once at startup.
pub struct Scene {
    pub cube: Mesh,
    pub plane: Mesh,
    pub sky_mesh: Mesh,
    /// Metal grid for the ground plane.
    pub floor: Material,
    /// Checker fabric for the side walls.
    pub fabric: Material,
    /// Green-on-black checker for the culled cube.
    pub matrix: Material,
    /// Hull pattern for the ship stand-in model.
    pub hull: Material,
    /// Starfield cubemap for the skybox.
    pub sky: SceneTexture,
    _sampler: wgpu::Sampler,
}

impl Scene {
    /// Build all meshes and textures and their material bind groups
    /// against the scene pass's material layout.
    #[must_use]
    pub fn new(context: &RenderContext, material_layout: &wgpu::BindGroupLayout) -> Self {
        let sampler = pipeline_helpers::repeat_sampler(&context.device, "Material Sampler");

        let floor = Material::new(
            context,
            "Floor Material",
            material_layout,
            texture::metal_grid(context, "Floor Texture"),
            &sampler,
        );
        let fabric = Material::new(
            context,
            "Fabric Material",
            material_layout,
            texture::checkerboard(context, "Fabric Texture", [188, 154, 102], [128, 96, 64]),
            &sampler,
        );
        let matrix = Material::new(
            context,
            "Matrix Material",
            material_layout,
            texture::checkerboard(context, "Matrix Texture", [10, 26, 10], [40, 200, 70]),
            &sampler,
        );
        let hull = Material::new(
            context,
            "Hull Material",
            material_layout,
            texture::checkerboard(context, "Hull Texture", [150, 150, 160], [60, 64, 80]),
            &sampler,
        );

        Self {
            cube: Mesh::cube(context),
            plane: Mesh::plane(context),
            sky_mesh: Mesh::skybox(context),
            floor,
            fabric,
            matrix,
            hull,
            sky: texture::starfield_cubemap(context, 0x5745_4d49_52),
            _sampler: sampler,
        }
    }
}
