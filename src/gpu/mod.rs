//! GPU plumbing: device/surface ownership, bind-layout helpers, and
//! texture creation.

/// Shared bind-group-layout entry and pipeline helpers.
pub mod pipeline_helpers;
/// Core wgpu resources: device, queue, surface, configuration.
pub mod render_context;
/// Depth target, offscreen HDR target, and procedural scene textures.
pub mod texture;
