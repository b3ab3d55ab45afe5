use serde::{Deserialize, Serialize};

/// Point-light parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LightingOptions {
    /// Ambient light color.
    pub ambient: [f32; 3],
    /// Diffuse light color.
    pub diffuse: [f32; 3],
    /// Specular light color.
    pub specular: [f32; 3],
    /// Constant attenuation term.
    pub constant: f32,
    /// Linear attenuation term.
    pub linear: f32,
    /// Quadratic attenuation term.
    pub quadratic: f32,
    /// Specular shininess exponent.
    pub shininess: f32,
    /// Radius of the light's orbit around the scene origin.
    pub orbit_radius: f32,
    /// Height of the light's orbit plane.
    pub orbit_height: f32,
}

impl Default for LightingOptions {
    fn default() -> Self {
        Self {
            ambient: [0.1, 0.1, 0.1],
            diffuse: [0.6, 0.6, 0.6],
            specular: [1.0, 1.0, 1.0],
            constant: 1.0,
            linear: 0.09,
            quadratic: 0.032,
            shininess: 32.0,
            orbit_radius: 4.0,
            orbit_height: 4.0,
        }
    }
}
