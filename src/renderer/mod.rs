//! Render passes: lit scene geometry, skybox, and the HDR tonemap
//! composite.

/// Per-draw model transforms through one dynamic-offset uniform buffer.
pub mod model;
/// Textured Blinn/Phong scene geometry pass.
pub mod scene_pass;
/// Cubemap skybox pass, drawn last at maximum depth.
pub mod skybox;
/// Offscreen HDR target and exposure tonemap to the swapchain.
pub mod tonemap;

pub use model::ModelStack;
pub use scene_pass::ScenePass;
pub use skybox::SkyboxPass;
pub use tonemap::TonemapPass;

/// Format of the offscreen target the scene renders into before
/// tonemapping.
pub const HDR_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba16Float;
