//! GPU-accelerated wave-field visualization built on wgpu.
//!
//! Swell evaluates a procedural wave height field on the GPU and renders it
//! as a displaced, lit surface:
//!
//! - a compute pass ([`simulation::WaveField`]) regenerates the height map
//!   every frame, one invocation per texel in 16×16 workgroups;
//! - a raster pass ([`renderer::SurfaceRenderer`]) displaces a subdivided
//!   plane by the height map in the vertex stage, estimates per-vertex
//!   normals by finite differences, and shades with a fixed directional
//!   light in the fragment stage.
//!
//! # Key entry points
//!
//! - [`engine::WaveRenderEngine`] - the rendering engine
//! - [`viewer::Viewer`] - standalone winit window (requires the `viewer`
//!   feature)
//! - [`options::Options`] - runtime configuration (camera, simulation,
//!   display)
//!
//! The CPU reference implementation of the shader math lives in
//! [`util::height_field`] and is kept in sync with the WGSL module it
//! mirrors.

pub mod camera;
pub mod engine;
pub mod error;
pub mod gpu;
pub mod options;
pub mod renderer;
pub mod simulation;
pub mod util;
#[cfg(feature = "viewer")]
pub mod viewer;

#[cfg(feature = "viewer")]
pub use viewer::Viewer;
