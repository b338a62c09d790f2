//! Camera configuration

use serde::{Deserialize, Serialize};

/// Camera configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Track the player horizontally
    pub follow_x: bool,
    /// Track the player vertically
    pub follow_y: bool,
    /// Real seconds a teleport pan takes
    pub pan_duration: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            follow_x: true,
            follow_y: false,
            pan_duration: 0.5,
        }
    }
}
