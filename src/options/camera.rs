use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
/// Camera projection and control parameters.
pub struct CameraOptions {
    /// Vertical field of view in degrees.
    pub fovy: f32,
    /// Near clipping plane distance.
    pub znear: f32,
    /// Far clipping plane distance.
    pub zfar: f32,
    /// Initial downward tilt of the orbit in degrees.
    pub initial_tilt: f32,
    /// Rotation speed in radians per pixel of mouse movement.
    pub rotate_speed: f32,
    /// Pan speed in world units per pixel of mouse movement.
    pub pan_speed: f32,
    /// Pan speed for held movement keys, in world units per second.
    pub key_pan_speed: f32,
    /// Zoom speed as a fractional distance change per scroll line.
    pub zoom_speed: f32,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            fovy: 45.0,
            znear: 0.1,
            zfar: 100.0,
            initial_tilt: 35.0,
            rotate_speed: 0.01,
            pan_speed: 0.01,
            key_pan_speed: 2.0,
            zoom_speed: 0.05,
        }
    }
}
