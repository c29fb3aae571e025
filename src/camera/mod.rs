//! Orbit camera: projection math, GPU uniform state, and input handling.

/// Orbital camera controller and GPU uniform management.
pub mod controller;
/// Camera projection parameters and the GPU uniform layout.
pub mod core;
/// Winit event handling for the camera controller.
#[cfg(feature = "viewer")]
pub mod input;

pub use controller::CameraController;
pub use core::{Camera, CameraUniform};
#[cfg(feature = "viewer")]
pub use input::{InputEffect, InputHandler};
