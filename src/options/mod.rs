//! Tunable settings loaded from an optional TOML file.
//!
//! All sub-structs use `#[serde(default)]` so partial files (e.g. only
//! overriding `[lighting]`) work correctly. A missing file is normal;
//! a malformed one falls back to defaults with a warning.

mod camera;
mod lighting;
mod overlay;
mod post_processing;

use std::path::Path;

pub use camera::CameraOptions;
pub use lighting::LightingOptions;
pub use overlay::OverlayOptions;
pub use post_processing::PostProcessingOptions;
use serde::{Deserialize, Serialize};

use crate::error::StarviewError;

/// Top-level options container.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Options {
    /// Camera gains and projection planes.
    pub camera: CameraOptions,
    /// Point-light parameters.
    pub lighting: LightingOptions,
    /// Tonemapping parameters.
    pub post_processing: PostProcessingOptions,
    /// Stats overlay parameters.
    pub overlay: OverlayOptions,
}

impl Options {
    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, StarviewError> {
        let content = std::fs::read_to_string(path).map_err(StarviewError::Io)?;
        toml::from_str(&content).map_err(|e| StarviewError::OptionsParse(e.to_string()))
    }

    /// Load from `path` if it exists and parses; otherwise defaults.
    #[must_use]
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match Self::load(path) {
            Ok(options) => options,
            Err(e) => {
                log::warn!("ignoring options file {}: {e}", path.display());
                Self::default()
            }
        }
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), StarviewError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| StarviewError::OptionsParse(e.to_string()))?;
        std::fs::write(path, content).map_err(StarviewError::Io)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_round_trips_through_toml() {
        let options = Options::default();
        let toml_str = toml::to_string_pretty(&options).unwrap();
        let parsed: Options = toml::from_str(&toml_str).unwrap();
        assert_eq!(options, parsed);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let parsed: Options = toml::from_str(
            "[camera]\nmovement_speed = 5.0\n\n[post_processing]\nexposure = 1.5\n",
        )
        .unwrap();
        assert_eq!(parsed.camera.movement_speed, 5.0);
        assert_eq!(parsed.camera.mouse_sensitivity, 0.1);
        assert_eq!(parsed.post_processing.exposure, 1.5);
        assert!(parsed.post_processing.hdr);
        assert_eq!(parsed.lighting, LightingOptions::default());
    }

    #[test]
    fn garbage_input_is_an_error() {
        assert!(toml::from_str::<Options>("camera = 12").is_err());
    }
}
