use serde::{Deserialize, Serialize};

/// Tonemapping parameters for the composite pass.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PostProcessingOptions {
    /// Whether HDR exposure tonemapping starts enabled.
    pub hdr: bool,
    /// Exposure applied by the tonemap operator.
    pub exposure: f32,
}

impl Default for PostProcessingOptions {
    fn default() -> Self {
        Self {
            hdr: true,
            exposure: 1.0,
        }
    }
}
