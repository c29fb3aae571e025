//! GPU wave field: ping-pong storage textures driven by a compute pass.
//!
//! The compute shader writes the procedural wave pattern into the inactive
//! texture each step while the previously written texture is bound for
//! reading. The renderer samples whichever texture holds the latest heights.

use crate::error::SwellError;
use crate::gpu::pipeline_helpers;
use crate::gpu::render_context::RenderContext;
use crate::gpu::shader_composer::ShaderComposer;

/// Square side length of each compute workgroup in invocations. Must match
/// the `@workgroup_size` in `compute/wave_field.wgsl`.
pub const WORKGROUP_SIZE: u32 = 16;

/// Texel format of the height textures. The red channel carries the height;
/// the green channel is reserved for velocity.
pub const FIELD_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rg32Float;

/// Largest supported field side length, within wgpu's default
/// `max_texture_dimension_2d` limit.
pub const MAX_FIELD_SIZE: u32 = 8192;

/// Number of workgroups needed to cover `size` invocations along one axis.
pub fn workgroup_count(size: u32) -> u32 {
    size.div_ceil(WORKGROUP_SIZE)
}

/// Clamp a requested field size into the supported texture range.
pub fn field_size(requested: u32) -> u32 {
    requested.clamp(WORKGROUP_SIZE, MAX_FIELD_SIZE)
}

/// Ping-pong height field on the GPU.
pub struct WaveField {
    size: u32,
    pipeline: wgpu::ComputePipeline,
    /// Bind group reading texture A and writing texture B.
    compute_a_to_b: wgpu::BindGroup,
    /// Bind group reading texture B and writing texture A.
    compute_b_to_a: wgpu::BindGroup,
    /// Render-side bind group sampling texture A.
    read_a: wgpu::BindGroup,
    /// Render-side bind group sampling texture B.
    read_b: wgpu::BindGroup,
    /// Layout for the render-side height texture bind group (group 1).
    height_layout: wgpu::BindGroupLayout,
    /// True when texture A holds the latest heights.
    a_is_current: bool,
}

impl WaveField {
    /// Create the textures, compute pipeline, and all bind groups for a
    /// `size` x `size` field.
    pub fn new(
        context: &RenderContext,
        composer: &mut ShaderComposer,
        size: u32,
    ) -> Result<Self, SwellError> {
        let size = field_size(size);
        let device = &context.device;

        let make_texture = |label: &str| {
            device.create_texture(&wgpu::TextureDescriptor {
                label: Some(label),
                size: wgpu::Extent3d {
                    width: size,
                    height: size,
                    depth_or_array_layers: 1,
                },
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: FIELD_FORMAT,
                usage: wgpu::TextureUsages::STORAGE_BINDING
                    | wgpu::TextureUsages::TEXTURE_BINDING,
                view_formats: &[],
            })
        };

        let texture_a = make_texture("Wave Field Texture A");
        let texture_b = make_texture("Wave Field Texture B");
        let view_a =
            texture_a.create_view(&wgpu::TextureViewDescriptor::default());
        let view_b =
            texture_b.create_view(&wgpu::TextureViewDescriptor::default());

        let compute_layout = device.create_bind_group_layout(
            &wgpu::BindGroupLayoutDescriptor {
                label: Some("Wave Field Compute Bind Group Layout"),
                entries: &[
                    pipeline_helpers::texture_2d(
                        0,
                        wgpu::ShaderStages::COMPUTE,
                    ),
                    pipeline_helpers::storage_texture_2d(1, FIELD_FORMAT),
                ],
            },
        );

        let height_layout = device.create_bind_group_layout(
            &wgpu::BindGroupLayoutDescriptor {
                label: Some("Height Texture Bind Group Layout"),
                entries: &[pipeline_helpers::texture_2d(
                    0,
                    wgpu::ShaderStages::VERTEX_FRAGMENT,
                )],
            },
        );

        let compute_bind_group = |label: &str,
                                  src: &wgpu::TextureView,
                                  dst: &wgpu::TextureView| {
            device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some(label),
                layout: &compute_layout,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: 0,
                        resource: wgpu::BindingResource::TextureView(src),
                    },
                    wgpu::BindGroupEntry {
                        binding: 1,
                        resource: wgpu::BindingResource::TextureView(dst),
                    },
                ],
            })
        };

        let compute_a_to_b =
            compute_bind_group("Wave Compute A->B", &view_a, &view_b);
        let compute_b_to_a =
            compute_bind_group("Wave Compute B->A", &view_b, &view_a);

        let read_bind_group = |label: &str, view: &wgpu::TextureView| {
            device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some(label),
                layout: &height_layout,
                entries: &[wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(view),
                }],
            })
        };

        let read_a = read_bind_group("Height Read A", &view_a);
        let read_b = read_bind_group("Height Read B", &view_b);

        let shader = composer
            .compose(
                device,
                "Wave Field Compute Shader",
                include_str!("../../assets/shaders/compute/wave_field.wgsl"),
                "compute/wave_field.wgsl",
            )
            .map_err(|e| SwellError::Shader(e.to_string()))?;

        let pipeline_layout = device.create_pipeline_layout(
            &wgpu::PipelineLayoutDescriptor {
                label: Some("Wave Field Pipeline Layout"),
                bind_group_layouts: &[&compute_layout],
                push_constant_ranges: &[],
            },
        );

        let pipeline = device.create_compute_pipeline(
            &wgpu::ComputePipelineDescriptor {
                label: Some("Wave Field Compute Pipeline"),
                layout: Some(&pipeline_layout),
                module: &shader,
                entry_point: Some("cs_main"),
                compilation_options: wgpu::PipelineCompilationOptions::default(
                ),
                cache: None,
            },
        );

        Ok(Self {
            size,
            pipeline,
            compute_a_to_b,
            compute_b_to_a,
            read_a,
            read_b,
            height_layout,
            a_is_current: false,
        })
    }

    /// Layout for binding the current height texture in the render pass.
    pub fn height_layout(&self) -> &wgpu::BindGroupLayout {
        &self.height_layout
    }

    /// Bind group sampling the most recently written height texture.
    pub fn height_bind_group(&self) -> &wgpu::BindGroup {
        if self.a_is_current {
            &self.read_a
        } else {
            &self.read_b
        }
    }

    /// Record one compute step into `encoder`, swapping which texture holds
    /// the current heights.
    pub fn step(&mut self, encoder: &mut wgpu::CommandEncoder) {
        let bind_group = if self.a_is_current {
            // A holds the latest heights, write the next into B.
            &self.compute_a_to_b
        } else {
            &self.compute_b_to_a
        };

        {
            let mut pass =
                encoder.begin_compute_pass(&wgpu::ComputePassDescriptor {
                    label: Some("Wave Field Compute Pass"),
                    timestamp_writes: None,
                });
            pass.set_pipeline(&self.pipeline);
            pass.set_bind_group(0, bind_group, &[]);
            let groups = workgroup_count(self.size);
            pass.dispatch_workgroups(groups, groups, 1);
        }

        self.a_is_current = !self.a_is_current;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn workgroup_count_covers_all_texels() {
        assert_eq!(workgroup_count(256), 16);
        assert_eq!(workgroup_count(16), 1);
        // Non-aligned sizes round up so edge texels are still dispatched.
        assert_eq!(workgroup_count(17), 2);
        assert_eq!(workgroup_count(250), 16);
        assert_eq!(workgroup_count(1), 1);
    }

    #[test]
    fn field_size_clamps_to_supported_range() {
        assert_eq!(field_size(256), 256);
        assert_eq!(field_size(0), WORKGROUP_SIZE);
        assert_eq!(field_size(1_000_000), MAX_FIELD_SIZE);
    }
}
