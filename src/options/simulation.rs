use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
/// Wave field and surface mesh sizing.
pub struct SimulationOptions {
    /// Side length of the square height texture in texels.
    pub field_size: u32,
    /// Vertices per side of the surface grid mesh.
    pub mesh_resolution: u32,
    /// World-space side length of the surface.
    pub extent: f32,
}

impl Default for SimulationOptions {
    fn default() -> Self {
        Self {
            field_size: 256,
            mesh_resolution: 128,
            extent: 5.0,
        }
    }
}
