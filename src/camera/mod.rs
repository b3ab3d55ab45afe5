//! Camera system for first-person scene viewing.
//!
//! A free-fly yaw/pitch camera plus the GPU uniform binding the render
//! passes consume.

/// Free-fly camera core: orientation, movement, view/projection math.
pub mod fly;
/// GPU uniform buffer and bind group for the camera.
pub mod uniform;

pub use fly::{FlyCamera, MoveDirection};
pub use uniform::{CameraBinding, CameraUniform};
