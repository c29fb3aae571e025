use glam::{Quat, Vec2, Vec3};
use wgpu::util::DeviceExt;

use crate::camera::core::{Camera, CameraUniform};
use crate::gpu::pipeline_helpers;
use crate::gpu::render_context::RenderContext;
use crate::options::CameraOptions;

/// Orbital camera controller: a quaternion orientation and distance around a
/// focus point, plus the GPU uniform buffer and bind group.
pub struct CameraController {
    orientation: Quat,
    distance: f32,
    focus_point: Vec3,

    /// Current camera state.
    pub camera: Camera,
    /// GPU uniform buffer holding the view-projection matrix.
    pub buffer: wgpu::Buffer,
    /// Bind group layout for the camera uniform (group 0).
    pub layout: wgpu::BindGroupLayout,
    /// Bind group holding the camera uniform buffer.
    pub bind_group: wgpu::BindGroup,

    /// Whether the primary mouse button is held.
    pub mouse_pressed: bool,
    /// Whether shift is held (drag pans instead of rotating).
    pub shift_pressed: bool,
    rotate_speed: f32,
    pan_speed: f32,
    key_pan_speed: f32,
    zoom_speed: f32,
}

impl CameraController {
    /// Create a controller orbiting `focus_point` at `distance`.
    pub fn new(
        context: &RenderContext,
        options: &CameraOptions,
        focus_point: Vec3,
        distance: f32,
    ) -> Self {
        let orientation = Quat::from_axis_angle(
            Vec3::X,
            -options.initial_tilt.to_radians(),
        );

        let camera = Camera {
            eye: focus_point + Vec3::new(0.0, 0.0, distance),
            target: focus_point,
            up: Vec3::Y,
            aspect: context.config.width as f32 / context.config.height as f32,
            fovy: options.fovy,
            znear: options.znear,
            zfar: options.zfar,
        };

        let uniform = CameraUniform::from(camera.view_projection());
        let buffer = context
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Camera Buffer"),
                contents: bytemuck::bytes_of(&uniform),
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            });

        let layout = context.device.create_bind_group_layout(
            &wgpu::BindGroupLayoutDescriptor {
                label: Some("Camera Bind Group Layout"),
                entries: &[pipeline_helpers::uniform_buffer(
                    0,
                    wgpu::ShaderStages::VERTEX,
                )],
            },
        );

        let bind_group =
            context
                .device
                .create_bind_group(&wgpu::BindGroupDescriptor {
                    layout: &layout,
                    entries: &[wgpu::BindGroupEntry {
                        binding: 0,
                        resource: buffer.as_entire_binding(),
                    }],
                    label: Some("Camera Bind Group"),
                });

        let mut controller = Self {
            orientation,
            distance,
            focus_point,
            camera,
            buffer,
            layout,
            bind_group,
            mouse_pressed: false,
            shift_pressed: false,
            rotate_speed: options.rotate_speed,
            pan_speed: options.pan_speed,
            key_pan_speed: options.key_pan_speed,
            zoom_speed: options.zoom_speed,
        };
        controller.update_camera_pos();
        controller
    }

    fn update_camera_pos(&mut self) {
        let dir = self.orientation * Vec3::Z;

        self.camera.eye = self.focus_point + (dir * self.distance);
        self.camera.target = self.focus_point;
        self.camera.up = self.orientation * Vec3::Y;
    }

    /// Move the focus point within the view plane by world-space amounts
    /// along the camera's right and up axes.
    fn translate_focus(&mut self, delta: Vec2) {
        let right = self.orientation * Vec3::X;
        let up = self.orientation * Vec3::Y;

        self.focus_point += right * delta.x + up * delta.y;
        self.update_camera_pos();
    }

    /// Upload the current view-projection matrix to the GPU.
    pub fn update_gpu(&self, queue: &wgpu::Queue) {
        let uniform = CameraUniform::from(self.camera.view_projection());
        queue.write_buffer(&self.buffer, 0, bytemuck::bytes_of(&uniform));
    }

    /// Update the aspect ratio after a window resize.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.camera.resize(width, height);
    }

    /// Rotate the orbit by a mouse-drag delta in pixels.
    pub fn rotate(&mut self, delta: Vec2) {
        // Horizontal rotation around the camera's up vector
        let up = self.orientation * Vec3::Y;
        let horizontal =
            Quat::from_axis_angle(up, -delta.x * self.rotate_speed);
        self.orientation = horizontal * self.orientation;

        // Vertical rotation around the camera's right vector
        let right = self.orientation * Vec3::X;
        let vertical = Quat::from_axis_angle(right, -delta.y * self.rotate_speed);
        self.orientation = vertical * self.orientation;

        self.update_camera_pos();
    }

    /// Pan the focus point by a mouse-drag delta in pixels.
    pub fn pan(&mut self, delta: Vec2) {
        self.translate_focus(
            Vec2::new(-delta.x, delta.y) * self.pan_speed,
        );
    }

    /// Pan the focus point by a held-key direction scaled by frame time
    /// (`direction_dt` = unit direction times dt in seconds).
    pub fn pan_world(&mut self, direction_dt: Vec2) {
        self.translate_focus(direction_dt * self.key_pan_speed);
    }

    /// Zoom by a scroll delta (positive = closer).
    pub fn zoom(&mut self, delta: f32) {
        self.distance *= 1.0 - delta * self.zoom_speed;
        self.distance = self.distance.clamp(0.5, 200.0);
        self.update_camera_pos();
    }
}
