//! GPU resource management utilities.
//!
//! Provides wgpu device/surface initialization, bind-group-layout helpers,
//! the depth target, and WGSL shader composition.

/// Shared wgpu bind-group-layout and pipeline-state helpers.
pub mod pipeline_helpers;
/// wgpu device, surface, and queue initialization.
pub mod render_context;
/// WGSL shader composition with `#import` support via naga-oil.
pub mod shader_composer;
/// Depth-target texture abstraction.
pub mod texture;
