//! Surface rendering: grid mesh plus the displaced, lit render pipeline.

/// Surface grid mesh generation and GPU buffers.
pub mod mesh;

pub use mesh::{SurfaceMesh, SurfaceVertex};

use crate::error::SwellError;
use crate::gpu::pipeline_helpers;
use crate::gpu::render_context::RenderContext;
use crate::gpu::shader_composer::ShaderComposer;
use crate::options::SimulationOptions;

/// Renders the height-displaced surface grid with Lambertian shading.
pub struct SurfaceRenderer {
    pipeline: wgpu::RenderPipeline,
    mesh: SurfaceMesh,
}

impl SurfaceRenderer {
    /// Build the render pipeline and upload the surface mesh.
    pub fn new(
        context: &RenderContext,
        composer: &mut ShaderComposer,
        camera_layout: &wgpu::BindGroupLayout,
        height_layout: &wgpu::BindGroupLayout,
        options: &SimulationOptions,
    ) -> Result<Self, SwellError> {
        let device = &context.device;

        let shader = composer
            .compose(
                device,
                "Surface Shader",
                include_str!("../../assets/shaders/raster/surface.wgsl"),
                "raster/surface.wgsl",
            )
            .map_err(|e| SwellError::Shader(e.to_string()))?;

        let pipeline_layout = device.create_pipeline_layout(
            &wgpu::PipelineLayoutDescriptor {
                label: Some("Surface Pipeline Layout"),
                bind_group_layouts: &[camera_layout, height_layout],
                push_constant_ranges: &[],
            },
        );

        let pipeline = device.create_render_pipeline(
            &wgpu::RenderPipelineDescriptor {
                label: Some("Surface Render Pipeline"),
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs_main"),
                    compilation_options:
                        wgpu::PipelineCompilationOptions::default(),
                    buffers: &[SurfaceVertex::layout()],
                },
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some("fs_main"),
                    compilation_options:
                        wgpu::PipelineCompilationOptions::default(),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: context.format(),
                        blend: Some(wgpu::BlendState::REPLACE),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                }),
                primitive: wgpu::PrimitiveState {
                    topology: wgpu::PrimitiveTopology::TriangleList,
                    // The camera can orbit below the surface, so no culling.
                    cull_mode: None,
                    ..Default::default()
                },
                depth_stencil: Some(pipeline_helpers::depth_stencil_state()),
                multisample: wgpu::MultisampleState::default(),
                multiview: None,
                cache: None,
            },
        );

        let mesh =
            SurfaceMesh::new(device, options.mesh_resolution, options.extent);

        Ok(Self { pipeline, mesh })
    }

    /// Record the surface draw into an open render pass.
    pub fn draw(
        &self,
        pass: &mut wgpu::RenderPass<'_>,
        camera_bind_group: &wgpu::BindGroup,
        height_bind_group: &wgpu::BindGroup,
    ) {
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, camera_bind_group, &[]);
        pass.set_bind_group(1, height_bind_group, &[]);
        pass.set_vertex_buffer(0, self.mesh.vertex_buffer.slice(..));
        pass.set_index_buffer(
            self.mesh.index_buffer.slice(..),
            wgpu::IndexFormat::Uint32,
        );
        pass.draw_indexed(0..self.mesh.index_count, 0, 0..1);
    }
}
