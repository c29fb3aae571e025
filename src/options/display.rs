use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
/// Window and presentation settings.
pub struct DisplayOptions {
    /// Background clear color as linear RGB.
    pub clear_color: [f64; 3],
    /// Frame rate cap for the viewer loop.
    pub target_fps: u32,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            clear_color: [0.008, 0.012, 0.03],
            target_fps: 60,
        }
    }
}
