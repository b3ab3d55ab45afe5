//! Render targets and procedural scene textures.
//!
//! Image-file loading is deliberately out of scope; the checker
//! patterns and the starfield cubemap are generated on the CPU and
//! uploaded once at startup.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::gpu::render_context::RenderContext;

/// A render-target texture and its default view.
pub struct RenderTarget {
    /// The underlying GPU texture.
    pub texture: wgpu::Texture,
    /// A default full-texture view.
    pub view: wgpu::TextureView,
}

impl RenderTarget {
    /// Create a new render-target texture with the given dimensions and
    /// format, usable as both attachment and sampled texture.
    #[must_use]
    pub fn new(
        device: &wgpu::Device,
        label: &str,
        width: u32,
        height: u32,
        format: wgpu::TextureFormat,
    ) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT
                | wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Self { texture, view }
    }
}

/// Depth format used by the scene pass.
pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// Create the scene depth texture at the current surface size.
pub fn create_depth_texture(context: &RenderContext) -> (wgpu::Texture, wgpu::TextureView) {
    let texture = context.device.create_texture(&wgpu::TextureDescriptor {
        label: Some("Depth Texture"),
        size: wgpu::Extent3d {
            width: context.config.width,
            height: context.config.height,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
    (texture, view)
}

/// A sampled 2D texture for scene materials.
pub struct SceneTexture {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
}

/// Upload an Rgba8UnormSrgb texture from raw RGBA pixels.
fn upload_rgba(
    context: &RenderContext,
    label: &str,
    size: u32,
    pixels: &[u8],
) -> SceneTexture {
    let texture = context.device.create_texture(&wgpu::TextureDescriptor {
        label: Some(label),
        size: wgpu::Extent3d {
            width: size,
            height: size,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: wgpu::TextureFormat::Rgba8UnormSrgb,
        usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        view_formats: &[],
    });
    context.queue.write_texture(
        wgpu::TexelCopyTextureInfo {
            texture: &texture,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        pixels,
        wgpu::TexelCopyBufferLayout {
            offset: 0,
            bytes_per_row: Some(size * 4),
            rows_per_image: Some(size),
        },
        wgpu::Extent3d {
            width: size,
            height: size,
            depth_or_array_layers: 1,
        },
    );
    let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
    SceneTexture { texture, view }
}

/// Two-tone checker pattern, eight squares per edge.
pub fn checkerboard(
    context: &RenderContext,
    label: &str,
    color_a: [u8; 3],
    color_b: [u8; 3],
) -> SceneTexture {
    const SIZE: u32 = 256;
    const CELLS: u32 = 8;
    let cell = SIZE / CELLS;
    let mut pixels = vec![0u8; (SIZE * SIZE * 4) as usize];
    for y in 0..SIZE {
        for x in 0..SIZE {
            let even = ((x / cell) + (y / cell)) % 2 == 0;
            let color = if even { color_a } else { color_b };
            let offset = ((y * SIZE + x) * 4) as usize;
            pixels[offset..offset + 3].copy_from_slice(&color);
            pixels[offset + 3] = 255;
        }
    }
    upload_rgba(context, label, SIZE, &pixels)
}

/// Grid of bright lines over a base color, standing in for the metal
/// floor texture.
pub fn metal_grid(context: &RenderContext, label: &str) -> SceneTexture {
    const SIZE: u32 = 256;
    const SPACING: u32 = 32;
    let base = [96u8, 100, 108];
    let line = [180u8, 184, 190];
    let mut pixels = vec![0u8; (SIZE * SIZE * 4) as usize];
    for y in 0..SIZE {
        for x in 0..SIZE {
            let on_line = x % SPACING < 2 || y % SPACING < 2;
            let color = if on_line { line } else { base };
            let offset = ((y * SIZE + x) * 4) as usize;
            pixels[offset..offset + 3].copy_from_slice(&color);
            pixels[offset + 3] = 255;
        }
    }
    upload_rgba(context, label, SIZE, &pixels)
}

/// Procedural starfield cubemap.
///
/// Each face gets a near-black background with randomly placed stars of
/// varying brightness; a handful are written above 1.0-equivalent
/// brightness so the HDR tonemap has something to compress. Seeded so
/// the sky is identical across runs.
pub fn starfield_cubemap(context: &RenderContext, seed: u64) -> SceneTexture {
    const SIZE: u32 = 512;
    const STARS_PER_FACE: u32 = 420;

    let texture = context.device.create_texture(&wgpu::TextureDescriptor {
        label: Some("Starfield Cubemap"),
        size: wgpu::Extent3d {
            width: SIZE,
            height: SIZE,
            depth_or_array_layers: 6,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: wgpu::TextureFormat::Rgba8UnormSrgb,
        usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        view_formats: &[],
    });

    let mut rng = StdRng::seed_from_u64(seed);
    let mut pixels = vec![0u8; (SIZE * SIZE * 4) as usize];
    for face in 0..6u32 {
        // Deep-space background with a faint blue tint.
        for px in pixels.chunks_exact_mut(4) {
            px.copy_from_slice(&[2, 2, 6, 255]);
        }
        for _ in 0..STARS_PER_FACE {
            let x = rng.random_range(1..SIZE - 1);
            let y = rng.random_range(1..SIZE - 1);
            let brightness: f32 = rng.random_range(0.3..1.0);
            let value = (brightness * 255.0) as u8;
            let offset = ((y * SIZE + x) * 4) as usize;
            pixels[offset] = value;
            pixels[offset + 1] = value;
            pixels[offset + 2] = value.saturating_add(20);
            // Bright stars bleed into a small cross.
            if brightness > 0.85 {
                for neighbor in [
                    ((y - 1) * SIZE + x) * 4,
                    ((y + 1) * SIZE + x) * 4,
                    (y * SIZE + x - 1) * 4,
                    (y * SIZE + x + 1) * 4,
                ] {
                    let n = neighbor as usize;
                    pixels[n] = pixels[n].max(value / 2);
                    pixels[n + 1] = pixels[n + 1].max(value / 2);
                    pixels[n + 2] = pixels[n + 2].max(value / 2);
                }
            }
        }
        context.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d {
                    x: 0,
                    y: 0,
                    z: face,
                },
                aspect: wgpu::TextureAspect::All,
            },
            &pixels,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(SIZE * 4),
                rows_per_image: Some(SIZE),
            },
            wgpu::Extent3d {
                width: SIZE,
                height: SIZE,
                depth_or_array_layers: 1,
            },
        );
    }

    let view = texture.create_view(&wgpu::TextureViewDescriptor {
        label: Some("Starfield Cubemap View"),
        dimension: Some(wgpu::TextureViewDimension::Cube),
        ..Default::default()
    });
    SceneTexture { texture, view }
}
