use serde::{Deserialize, Serialize};

/// Camera gains and projection parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraOptions {
    /// Traversal speed in world units per second.
    pub movement_speed: f32,
    /// Degrees of rotation per pixel of mouse delta.
    pub mouse_sensitivity: f32,
    /// Near clipping plane distance.
    pub znear: f32,
    /// Far clipping plane distance.
    pub zfar: f32,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            movement_speed: 2.5,
            mouse_sensitivity: 0.1,
            znear: 0.1,
            zfar: 100.0,
        }
    }
}
