//! Standalone visualization window backed by winit.
//!
//! ```no_run
//! # use swell::Viewer;
//! Viewer::builder()
//!     .with_title("Swell")
//!     .build()
//!     .run()
//!     .unwrap();
//! ```

use std::sync::Arc;

use web_time::{Duration, Instant};
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use crate::{
    camera::{InputEffect, InputHandler},
    engine::WaveRenderEngine,
    error::SwellError,
    options::Options,
    util::FrameTiming,
};

/// How often the render-info window title refreshes.
const TITLE_REFRESH: Duration = Duration::from_millis(500);

/// Window title with render info appended: the frame loop's lightweight
/// stats display.
fn render_info_title(
    base: &str,
    fps: f32,
    frame_time_ms: f32,
    paused: bool,
) -> String {
    let state = if paused { " [paused]" } else { "" };
    format!("{base}{state} | {fps:.0} FPS | {frame_time_ms:.2} ms")
}

// ── Builder ──────────────────────────────────────────────────────────────

/// Fluent builder for [`Viewer`].
pub struct ViewerBuilder {
    options: Option<Options>,
    title: String,
}

impl ViewerBuilder {
    /// Create a builder with defaults (title "Swell", default options).
    fn new() -> Self {
        Self {
            options: None,
            title: "Swell".into(),
        }
    }

    /// Override the default options.
    #[must_use]
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = Some(options);
        self
    }

    /// Set the window title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Consume the builder and produce a [`Viewer`].
    #[must_use]
    pub fn build(self) -> Viewer {
        Viewer {
            options: self.options.unwrap_or_default(),
            title: self.title,
        }
    }
}

// ── Viewer ───────────────────────────────────────────────────────────────

/// A standalone window that displays the animated wave surface.
///
/// Construct via [`Viewer::builder`], then call [`run`](Self::run) to enter
/// the event loop.
pub struct Viewer {
    options: Options,
    title: String,
}

impl Viewer {
    /// Start a new builder.
    #[must_use]
    pub fn builder() -> ViewerBuilder {
        ViewerBuilder::new()
    }

    /// Open the window and run the event loop. Blocks until the window is
    /// closed.
    pub fn run(self) -> Result<(), SwellError> {
        let event_loop =
            EventLoop::new().map_err(|e| SwellError::Viewer(e.to_string()))?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let frame_timing = FrameTiming::new(self.options.display.target_fps);
        let mut app = ViewerApp {
            window: None,
            engine: None,
            input: InputHandler::new(),
            frame_timing,
            last_frame: Instant::now(),
            last_title_update: Instant::now(),
            options: self.options,
            title: self.title,
        };

        event_loop
            .run_app(&mut app)
            .map_err(|e| SwellError::Viewer(e.to_string()))
    }
}

// ── Winit app ────────────────────────────────────────────────────────────

/// Internal winit application handler.
struct ViewerApp {
    window: Option<Arc<Window>>,
    engine: Option<WaveRenderEngine>,
    input: InputHandler,
    frame_timing: FrameTiming,
    last_frame: Instant,
    last_title_update: Instant,
    options: Options,
    title: String,
}

/// Clamp the wgpu surface size to at least one pixel per axis.
fn viewport_size(inner: winit::dpi::PhysicalSize<u32>) -> (u32, u32) {
    (inner.width.max(1), inner.height.max(1))
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let monitor = event_loop
            .primary_monitor()
            .or_else(|| event_loop.available_monitors().next());
        let attrs = if let Some(mon) = &monitor {
            let mon_size = mon.size();
            let scale = mon.scale_factor();
            #[allow(clippy::cast_possible_truncation)]
            let logical_w = (mon_size.width as f64 / scale * 0.75) as u32;
            #[allow(clippy::cast_possible_truncation)]
            let logical_h = (mon_size.height as f64 / scale * 0.75) as u32;
            Window::default_attributes()
                .with_title(&self.title)
                .with_inner_size(winit::dpi::LogicalSize::new(
                    logical_w, logical_h,
                ))
        } else {
            Window::default_attributes().with_title(&self.title)
        };

        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                log::error!("Failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        let size = viewport_size(window.inner_size());
        let engine = match pollster::block_on(WaveRenderEngine::new(
            window.clone(),
            size,
            &self.options,
        )) {
            Ok(e) => e,
            Err(e) => {
                log::error!("Failed to initialize engine: {e}");
                event_loop.exit();
                return;
            }
        };

        window.request_redraw();
        self.window = Some(window);
        self.engine = Some(engine);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _id: WindowId,
        event: WindowEvent,
    ) {
        if matches!(event, WindowEvent::CloseRequested) {
            event_loop.exit();
            return;
        }

        let Some(engine) = &mut self.engine else {
            return;
        };

        match self.input.handle_event(&mut engine.camera, &event) {
            InputEffect::CameraChanged => {
                if let Some(w) = &self.window {
                    w.request_redraw();
                }
            }
            InputEffect::TogglePause => engine.toggle_paused(),
            InputEffect::StepOnce => engine.step_once(),
            InputEffect::None => {}
        }

        match event {
            WindowEvent::Resized(size) => {
                let (w, h) = viewport_size(size);
                engine.resize(w, h);
            }

            WindowEvent::RedrawRequested => {
                let now = Instant::now();
                let dt = now.duration_since(self.last_frame).as_secs_f32();
                self.last_frame = now;
                let _ = self.input.apply_held_keys(&mut engine.camera, dt);

                if self.frame_timing.should_render() {
                    match engine.render() {
                        Ok(()) => {}
                        Err(
                            wgpu::SurfaceError::Outdated
                            | wgpu::SurfaceError::Lost,
                        ) => {
                            if let Some(w) = &self.window {
                                let (vw, vh) = viewport_size(w.inner_size());
                                engine.resize(vw, vh);
                            }
                        }
                        Err(e) => {
                            log::error!("render error: {e:?}");
                        }
                    }
                    self.frame_timing.end_frame();

                    if now.duration_since(self.last_title_update)
                        >= TITLE_REFRESH
                    {
                        if let Some(w) = &self.window {
                            w.set_title(&render_info_title(
                                &self.title,
                                self.frame_timing.fps(),
                                self.frame_timing.frame_time_ms(),
                                engine.is_paused(),
                            ));
                        }
                        self.last_title_update = now;
                    }
                }
                if let Some(w) = &self.window {
                    w.request_redraw();
                }
            }

            _ => (),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_carries_fps_and_frame_time() {
        let title = render_info_title("Swell", 59.6, 16.78, false);
        assert_eq!(title, "Swell | 60 FPS | 16.78 ms");
    }

    #[test]
    fn title_marks_paused_state() {
        let title = render_info_title("Swell", 120.0, 8.33, true);
        assert!(title.starts_with("Swell [paused]"));
    }
}
