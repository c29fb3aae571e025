use glam::{Mat4, Vec3};

/// Perspective camera defined by eye position, target, and projection
/// parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Eye (camera) position in world space.
    pub eye: Vec3,
    /// Look-at target position.
    pub target: Vec3,
    /// Up direction vector.
    pub up: Vec3,
    /// Viewport aspect ratio (width / height).
    pub aspect: f32,
    /// Vertical field of view in degrees.
    pub fovy: f32,
    /// Near clipping plane distance.
    pub znear: f32,
    /// Far clipping plane distance.
    pub zfar: f32,
}

impl Camera {
    /// Combined view-projection matrix for the current state.
    pub fn view_projection(&self) -> Mat4 {
        let view = Mat4::look_at_rh(self.eye, self.target, self.up);
        // perspective_rh already uses [0,1] depth range (wgpu/Vulkan
        // convention)
        let proj = Mat4::perspective_rh(
            self.fovy.to_radians(),
            self.aspect,
            self.znear,
            self.zfar,
        );
        proj * view
    }

    /// Update the aspect ratio to match a new surface size.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.aspect = width as f32 / height.max(1) as f32;
    }
}

/// GPU uniform layout for the vertex stage: a single view-projection
/// matrix at group 0, binding 0.
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    /// Combined view-projection matrix, column-major.
    pub view_proj: [[f32; 4]; 4],
}

impl From<Mat4> for CameraUniform {
    fn from(view_proj: Mat4) -> Self {
        Self {
            view_proj: view_proj.to_cols_array_2d(),
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec4;

    use super::*;

    fn test_camera() -> Camera {
        Camera {
            eye: Vec3::new(2.5, 4.0, 9.0),
            target: Vec3::new(2.5, 0.0, 2.5),
            up: Vec3::Y,
            aspect: 16.0 / 9.0,
            fovy: 45.0,
            znear: 0.1,
            zfar: 100.0,
        }
    }

    #[test]
    fn target_projects_to_clip_center() {
        let camera = test_camera();
        let clip = camera.view_projection() * camera.target.extend(1.0);
        assert!((clip.x / clip.w).abs() < 1e-5);
        assert!((clip.y / clip.w).abs() < 1e-5);
    }

    #[test]
    fn resize_updates_aspect_and_tolerates_zero_height() {
        let mut camera = test_camera();
        camera.resize(800, 400);
        assert_eq!(camera.aspect, 2.0);
        camera.resize(800, 0);
        assert_eq!(camera.aspect, 800.0);
    }

    #[test]
    fn uniform_matches_matrix_columns() {
        let camera = test_camera();
        let matrix = camera.view_projection();
        let uniform = CameraUniform::from(matrix);
        assert_eq!(Vec4::from(uniform.view_proj[0]), matrix.col(0));
        assert_eq!(Vec4::from(uniform.view_proj[3]), matrix.col(3));
    }
}
