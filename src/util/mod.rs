//! Shared utilities: frame timing and the CPU mirror of the shader math.

/// Frame timing with FPS smoothing and frame limiting.
pub mod frame_timing;
/// CPU reference implementation of the wave and shading formulas.
pub mod height_field;

pub use frame_timing::FrameTiming;
pub use height_field::HeightField;
