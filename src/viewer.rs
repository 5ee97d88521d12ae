//! Standalone demo window backed by winit.
//!
//! ```no_run
//! # use orbit_cube::Viewer;
//! Viewer::builder()
//!     .with_title("Orbit Cube")
//!     .run()
//!     .unwrap();
//! ```

use std::{
    path::PathBuf,
    sync::Arc,
    time::{Duration, Instant},
};

use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use crate::{
    engine::Engine, error::CubeError, mesh, mesh::Mesh, options::Options,
};

// ── Builder ──────────────────────────────────────────────────────────────

/// Fluent builder for [`Viewer`].
pub struct ViewerBuilder {
    mesh_path: Option<PathBuf>,
    options: Option<Options>,
    title: String,
}

impl ViewerBuilder {
    /// Create a builder with sensible defaults (built-in cube, default
    /// options).
    fn new() -> Self {
        Self {
            mesh_path: None,
            options: None,
            title: "Orbit Cube".into(),
        }
    }

    /// Set an OBJ file to display instead of the built-in cube.
    #[must_use]
    pub fn with_mesh_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.mesh_path = Some(path.into());
        self
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

    /// Consume the builder, load the mesh, and produce a [`Viewer`].
    ///
    /// # Errors
    ///
    /// Returns [`CubeError::Io`] or [`CubeError::MeshLoad`] when an OBJ
    /// path was set and cannot be loaded.
    pub fn build(self) -> Result<Viewer, CubeError> {
        let mesh = match &self.mesh_path {
            Some(path) => mesh::obj::load(path)?,
            None => Mesh::cube(),
        };
        Ok(Viewer {
            mesh,
            options: self.options.unwrap_or_default(),
            title: self.title,
        })
    }

    /// Build and immediately run. Blocks until the window is closed.
    ///
    /// # Errors
    ///
    /// Propagates build errors plus any event-loop failure.
    pub fn run(self) -> Result<(), CubeError> {
        self.build()?.run()
    }
}

// ── Viewer ───────────────────────────────────────────────────────────────

/// A standalone window displaying the demo scene.
///
/// Construct via [`Viewer::builder`], then call [`run`](Self::run) to
/// enter the event loop.
pub struct Viewer {
    mesh: Mesh,
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
    ///
    /// # Errors
    ///
    /// Returns [`CubeError::Viewer`] when the event loop cannot be
    /// created or fails while running.
    pub fn run(self) -> Result<(), CubeError> {
        let event_loop =
            EventLoop::new().map_err(|e| CubeError::Viewer(e.to_string()))?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = ViewerApp {
            window: None,
            engine: None,
            last_frame_time: Instant::now(),
            last_title_update: Instant::now(),
            mesh: self.mesh,
            options: Some(self.options),
            title: self.title,
        };

        event_loop
            .run_app(&mut app)
            .map_err(|e| CubeError::Viewer(e.to_string()))
    }
}

// ── Winit app ────────────────────────────────────────────────────────────

/// Interval between FPS refreshes in the window title.
const TITLE_UPDATE_INTERVAL: Duration = Duration::from_millis(500);

/// Internal winit application handler.
struct ViewerApp {
    window: Option<Arc<Window>>,
    engine: Option<Engine>,
    last_frame_time: Instant,
    last_title_update: Instant,
    mesh: Mesh,
    options: Option<Options>,
    title: String,
}

/// Compute the wgpu surface size, never letting either dimension hit zero.
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
            let logical_w = (mon_size.width as f64 / scale * 0.75) as u32;
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

        let inner = window.inner_size();
        let (vp_w, vp_h) = viewport_size(inner);

        let options = self.options.take().unwrap_or_default();
        let engine_result = pollster::block_on(Engine::new(
            window.clone(),
            (vp_w, vp_h),
            options,
            &self.mesh,
        ));

        let engine = match engine_result {
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

        // Guard: both window and engine must be initialised.
        if self.window.is_none() || self.engine.is_none() {
            return;
        }

        match event {
            WindowEvent::Resized(event_size) => {
                let (vp_w, vp_h) = viewport_size(event_size);
                if let Some(engine) = &mut self.engine {
                    engine.resize(vp_w, vp_h);
                }
            }

            WindowEvent::RedrawRequested => {
                let now = Instant::now();
                let dt = now.duration_since(self.last_frame_time).as_secs_f32();
                self.last_frame_time = now;

                if let Some(engine) = &mut self.engine {
                    engine.update(dt);
                    match engine.render() {
                        Ok(()) => {}
                        Err(
                            wgpu::SurfaceError::Outdated
                            | wgpu::SurfaceError::Lost,
                        ) => {
                            if let Some(w) = &self.window {
                                let inner = w.inner_size();
                                let (vp_w, vp_h) = viewport_size(inner);
                                engine.resize(vp_w, vp_h);
                            }
                        }
                        Err(e) => {
                            log::error!("render error: {e:?}");
                        }
                    }

                    // Refresh the FPS readout in the title at ~2 Hz.
                    if let Some(w) = &self.window {
                        if now.duration_since(self.last_title_update)
                            >= TITLE_UPDATE_INTERVAL
                        {
                            w.set_title(&format!(
                                "{} | {:.1} fps",
                                self.title,
                                engine.frame_timing.fps()
                            ));
                            self.last_title_update = now;
                        }
                    }
                }
                if let Some(w) = &self.window {
                    w.request_redraw();
                }
            }

            WindowEvent::MouseInput { .. }
            | WindowEvent::CursorMoved { .. }
            | WindowEvent::MouseWheel { .. } => {
                let mut consumed = false;
                if let Some(engine) = &mut self.engine {
                    consumed = engine.handle_event(&event);
                }
                if consumed {
                    if let Some(w) = &self.window {
                        w.request_redraw();
                    }
                }
            }

            _ => (),
        }
    }
}
