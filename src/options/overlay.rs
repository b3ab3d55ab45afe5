use serde::{Deserialize, Serialize};

/// Stats overlay parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OverlayOptions {
    /// Seconds between stats readouts while the overlay is enabled.
    pub log_interval_secs: f32,
}

impl Default for OverlayOptions {
    fn default() -> Self {
        Self {
            log_interval_secs: 1.0,
        }
    }
}
