use wgpu::util::DeviceExt;

use crate::gpu::render_context::RenderContext;

/// Vertex for the lit scene meshes.
#[repr(C)]
#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

/// Vertex buffer layout for [`Vertex`].
pub fn vertex_buffer_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &[
            wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32x3,
                offset: 0,
                shader_location: 0, // position
            },
            wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32x3,
                offset: 12,
                shader_location: 1, // normal
            },
            wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32x2,
                offset: 24,
                shader_location: 2, // uv
            },
        ],
    }
}

/// Position-only vertex for the skybox cube.
#[repr(C)]
#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SkyVertex {
    pub position: [f32; 3],
}

/// Vertex buffer layout for [`SkyVertex`].
pub fn sky_vertex_buffer_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<SkyVertex>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &[wgpu::VertexAttribute {
            format: wgpu::VertexFormat::Float32x3,
            offset: 0,
            shader_location: 0, // position
        }],
    }
}

/// A non-indexed triangle mesh uploaded to the GPU.
pub struct Mesh {
    pub vertex_buffer: wgpu::Buffer,
    pub vertex_count: u32,
}

impl Mesh {
    fn upload(context: &RenderContext, label: &str, contents: &[u8], vertex_count: u32) -> Self {
        let vertex_buffer = context
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(label),
                contents,
                usage: wgpu::BufferUsages::VERTEX,
            });
        Self {
            vertex_buffer,
            vertex_count,
        }
    }

    /// Unit cube centered at the origin, 36 vertices with outward
    /// normals and per-face UVs.
    pub fn cube(context: &RenderContext) -> Self {
        let vertices = cube_vertices();
        Self::upload(
            context,
            "Cube Mesh",
            bytemuck::cast_slice(&vertices),
            vertices.len() as u32,
        )
    }

    /// 10x10 ground plane at y = -0.5, UVs tiled twice, normal up.
    pub fn plane(context: &RenderContext) -> Self {
        let vertices = plane_vertices();
        Self::upload(
            context,
            "Plane Mesh",
            bytemuck::cast_slice(&vertices),
            vertices.len() as u32,
        )
    }

    /// Position-only cube for the skybox, faces wound inward.
    pub fn skybox(context: &RenderContext) -> Self {
        let vertices = skybox_vertices();
        Self::upload(
            context,
            "Skybox Mesh",
            bytemuck::cast_slice(&vertices),
            vertices.len() as u32,
        )
    }
}

/// Expand a quad (two triangles) from four corners.
fn quad(
    out: &mut Vec<Vertex>,
    corners: [[f32; 3]; 4],
    normal: [f32; 3],
    uv_scale: f32,
) {
    let uvs = [
        [0.0, 0.0],
        [uv_scale, 0.0],
        [uv_scale, uv_scale],
        [0.0, uv_scale],
    ];
    for &i in &[0usize, 1, 2, 2, 3, 0] {
        out.push(Vertex {
            position: corners[i],
            normal,
            uv: uvs[i],
        });
    }
}

fn cube_vertices() -> Vec<Vertex> {
    let mut v = Vec::with_capacity(36);
    // Counter-clockwise winding viewed from outside each face.
    quad(
        &mut v,
        [
            [-0.5, -0.5, 0.5],
            [0.5, -0.5, 0.5],
            [0.5, 0.5, 0.5],
            [-0.5, 0.5, 0.5],
        ],
        [0.0, 0.0, 1.0],
        1.0,
    );
    quad(
        &mut v,
        [
            [0.5, -0.5, -0.5],
            [-0.5, -0.5, -0.5],
            [-0.5, 0.5, -0.5],
            [0.5, 0.5, -0.5],
        ],
        [0.0, 0.0, -1.0],
        1.0,
    );
    quad(
        &mut v,
        [
            [0.5, -0.5, 0.5],
            [0.5, -0.5, -0.5],
            [0.5, 0.5, -0.5],
            [0.5, 0.5, 0.5],
        ],
        [1.0, 0.0, 0.0],
        1.0,
    );
    quad(
        &mut v,
        [
            [-0.5, -0.5, -0.5],
            [-0.5, -0.5, 0.5],
            [-0.5, 0.5, 0.5],
            [-0.5, 0.5, -0.5],
        ],
        [-1.0, 0.0, 0.0],
        1.0,
    );
    quad(
        &mut v,
        [
            [-0.5, 0.5, 0.5],
            [0.5, 0.5, 0.5],
            [0.5, 0.5, -0.5],
            [-0.5, 0.5, -0.5],
        ],
        [0.0, 1.0, 0.0],
        1.0,
    );
    quad(
        &mut v,
        [
            [-0.5, -0.5, -0.5],
            [0.5, -0.5, -0.5],
            [0.5, -0.5, 0.5],
            [-0.5, -0.5, 0.5],
        ],
        [0.0, -1.0, 0.0],
        1.0,
    );
    v
}

fn plane_vertices() -> Vec<Vertex> {
    let mut v = Vec::with_capacity(6);
    quad(
        &mut v,
        [
            [-5.0, -0.5, 5.0],
            [5.0, -0.5, 5.0],
            [5.0, -0.5, -5.0],
            [-5.0, -0.5, -5.0],
        ],
        [0.0, 1.0, 0.0],
        2.0,
    );
    v
}

fn skybox_vertices() -> Vec<SkyVertex> {
    // Inward winding so the inside faces survive culling.
    const POSITIONS: [[f32; 3]; 36] = [
        [-1.0, 1.0, -1.0],
        [-1.0, -1.0, -1.0],
        [1.0, -1.0, -1.0],
        [1.0, -1.0, -1.0],
        [1.0, 1.0, -1.0],
        [-1.0, 1.0, -1.0],
        [-1.0, -1.0, 1.0],
        [-1.0, -1.0, -1.0],
        [-1.0, 1.0, -1.0],
        [-1.0, 1.0, -1.0],
        [-1.0, 1.0, 1.0],
        [-1.0, -1.0, 1.0],
        [1.0, -1.0, -1.0],
        [1.0, -1.0, 1.0],
        [1.0, 1.0, 1.0],
        [1.0, 1.0, 1.0],
        [1.0, 1.0, -1.0],
        [1.0, -1.0, -1.0],
        [-1.0, -1.0, 1.0],
        [-1.0, 1.0, 1.0],
        [1.0, 1.0, 1.0],
        [1.0, 1.0, 1.0],
        [1.0, -1.0, 1.0],
        [-1.0, -1.0, 1.0],
        [-1.0, 1.0, -1.0],
        [1.0, 1.0, -1.0],
        [1.0, 1.0, 1.0],
        [1.0, 1.0, 1.0],
        [-1.0, 1.0, 1.0],
        [-1.0, 1.0, -1.0],
        [-1.0, -1.0, -1.0],
        [-1.0, -1.0, 1.0],
        [1.0, -1.0, -1.0],
        [1.0, -1.0, -1.0],
        [-1.0, -1.0, 1.0],
        [1.0, -1.0, 1.0],
    ];
    POSITIONS
        .iter()
        .map(|&position| SkyVertex { position })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn cube_has_36_unit_normal_vertices() {
        let vertices = cube_vertices();
        assert_eq!(vertices.len(), 36);
        for v in &vertices {
            let n = Vec3::from_array(v.normal);
            assert!((n.length() - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn cube_faces_wind_outward() {
        let vertices = cube_vertices();
        for tri in vertices.chunks_exact(3) {
            let a = Vec3::from_array(tri[0].position);
            let b = Vec3::from_array(tri[1].position);
            let c = Vec3::from_array(tri[2].position);
            let face_normal = (b - a).cross(c - a).normalize();
            let stated = Vec3::from_array(tri[0].normal);
            assert!(face_normal.dot(stated) > 0.99);
        }
    }

    #[test]
    fn plane_lies_at_floor_height() {
        for v in plane_vertices() {
            assert_eq!(v.position[1], -0.5);
            assert_eq!(v.normal, [0.0, 1.0, 0.0]);
        }
    }

    #[test]
    fn skybox_faces_wind_inward() {
        let vertices = skybox_vertices();
        assert_eq!(vertices.len(), 36);
        for tri in vertices.chunks_exact(3) {
            let a = Vec3::from_array(tri[0].position);
            let b = Vec3::from_array(tri[1].position);
            let c = Vec3::from_array(tri[2].position);
            let face_normal = (b - a).cross(c - a);
            let centroid = (a + b + c) / 3.0;
            // The normal of an inward-wound face points away from the
            // cube center toward the viewer inside it.
            assert!(face_normal.dot(centroid) < 0.0);
        }
    }
}
