//! Top-level engine owning the GPU context, simulation, and renderer.

use glam::Vec3;

use crate::camera::CameraController;
use crate::error::SwellError;
use crate::gpu::render_context::RenderContext;
use crate::gpu::shader_composer::ShaderComposer;
use crate::gpu::texture::DepthTarget;
use crate::options::Options;
use crate::renderer::SurfaceRenderer;
use crate::simulation::WaveField;

/// Owns every GPU resource needed to simulate and draw the wave surface.
pub struct WaveRenderEngine {
    /// GPU device, queue, and surface state.
    pub context: RenderContext,
    /// Orbit camera and its uniform buffer.
    pub camera: CameraController,
    wave_field: WaveField,
    surface: SurfaceRenderer,
    depth: DepthTarget,
    clear_color: wgpu::Color,
    paused: bool,
}

impl WaveRenderEngine {
    /// Initialize the GPU context and build all pipelines and resources.
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        initial_size: (u32, u32),
        options: &Options,
    ) -> Result<Self, SwellError> {
        let context = RenderContext::new(window, initial_size).await?;

        let mut composer =
            ShaderComposer::new().map_err(|e| SwellError::Shader(e.to_string()))?;

        let extent = options.simulation.extent;
        let focus = Vec3::new(extent * 0.5, 0.0, extent * 0.5);
        let camera = CameraController::new(
            &context,
            &options.camera,
            focus,
            extent * 1.4,
        );

        let mut wave_field = WaveField::new(
            &context,
            &mut composer,
            options.simulation.field_size,
        )?;

        let surface = SurfaceRenderer::new(
            &context,
            &mut composer,
            &camera.layout,
            wave_field.height_layout(),
            &options.simulation,
        )?;

        let depth = DepthTarget::new(
            &context.device,
            context.config.width,
            context.config.height,
        );

        // Populate the field before the first draw so frame one already has
        // heights to sample.
        let mut encoder = context.create_encoder("Wave Warmup Encoder");
        wave_field.step(&mut encoder);
        context.submit(encoder);

        let [r, g, b] = options.display.clear_color;
        let clear_color = wgpu::Color { r, g, b, a: 1.0 };

        Ok(Self {
            context,
            camera,
            wave_field,
            surface,
            depth,
            clear_color,
            paused: false,
        })
    }

    /// Whether the simulation is currently paused.
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Toggle the simulation between running and paused. Rendering and
    /// camera control continue while paused.
    pub fn toggle_paused(&mut self) {
        self.paused = !self.paused;
        log::info!(
            "simulation {}",
            if self.paused { "paused" } else { "running" }
        );
    }

    /// Advance the simulation by exactly one compute step, independent of
    /// the render loop. Useful while paused.
    pub fn step_once(&mut self) {
        let mut encoder = self.context.create_encoder("Step Encoder");
        self.wave_field.step(&mut encoder);
        self.context.submit(encoder);
    }

    /// Resize the surface, depth buffer, and camera aspect ratio.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.context.resize(width, height);
        self.camera.resize(width, height);
        self.depth = DepthTarget::new(&self.context.device, width, height);
    }

    /// Step the simulation and draw one frame.
    pub fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        self.camera.update_gpu(&self.context.queue);

        let frame = self.context.get_next_frame()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self.context.create_encoder("Frame Encoder");
        if !self.paused {
            self.wave_field.step(&mut encoder);
        }

        {
            let mut pass =
                encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("Surface Render Pass"),
                    color_attachments: &[Some(
                        wgpu::RenderPassColorAttachment {
                            view: &view,
                            resolve_target: None,
                            ops: wgpu::Operations {
                                load: wgpu::LoadOp::Clear(self.clear_color),
                                store: wgpu::StoreOp::Store,
                            },
                            depth_slice: None,
                        },
                    )],
                    depth_stencil_attachment: Some(
                        wgpu::RenderPassDepthStencilAttachment {
                            view: &self.depth.view,
                            depth_ops: Some(wgpu::Operations {
                                load: wgpu::LoadOp::Clear(1.0),
                                store: wgpu::StoreOp::Store,
                            }),
                            stencil_ops: None,
                        },
                    ),
                    timestamp_writes: None,
                    occlusion_query_set: None,
                });

            self.surface.draw(
                &mut pass,
                &self.camera.bind_group,
                self.wave_field.height_bind_group(),
            );
        }

        self.context.submit(encoder);
        frame.present();

        Ok(())
    }
}
