//! Demo engine: render context + orbit camera + mesh pass.
//!
//! Owns everything needed to draw one frame behind an arbitrary window
//! handle. The hosting window (see [`crate::viewer`]) feeds it input
//! events, delta times, and resize notifications.

use crate::camera::{InputHandler, OrbitController};
use crate::error::CubeError;
use crate::gpu::render_context::RenderContext;
use crate::mesh::Mesh;
use crate::options::Options;
use crate::renderer::MeshRenderer;
use crate::util::frame_timing::FrameTiming;
use winit::event::WindowEvent;

/// Everything needed to render the demo scene into a surface.
pub struct Engine {
    context: RenderContext,
    controller: OrbitController,
    input: InputHandler,
    renderer: MeshRenderer,
    options: Options,
    /// Frame timing with smoothed FPS, read by the host for the title bar.
    pub frame_timing: FrameTiming,
}

impl Engine {
    /// Initialize the GPU context and build the scene around `mesh`.
    ///
    /// # Errors
    ///
    /// Returns [`CubeError::Gpu`] when GPU initialization fails.
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        initial_size: (u32, u32),
        options: Options,
        mesh: &Mesh,
    ) -> Result<Self, CubeError> {
        let context = RenderContext::new(window, initial_size).await?;

        let mut controller = OrbitController::new(&options.camera);
        controller.resize(initial_size.0, initial_size.1);
        controller.update();

        let renderer = MeshRenderer::new(&context, mesh);
        log::info!(
            "engine ready: {}x{}, {} triangles",
            initial_size.0,
            initial_size.1,
            mesh.triangle_count()
        );

        Ok(Self {
            context,
            controller,
            input: InputHandler::new(),
            renderer,
            options,
            frame_timing: FrameTiming::new(),
        })
    }

    /// Current options.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// The orbit controller (exposed for host-driven camera scripting).
    #[must_use]
    pub fn controller(&self) -> &OrbitController {
        &self.controller
    }

    /// Forward a window event to the camera input handler.
    ///
    /// Returns true if the event was consumed.
    pub fn handle_event(&mut self, event: &WindowEvent) -> bool {
        self.input.handle_event(&mut self.controller, event)
    }

    /// Reconfigure the surface, depth buffer, and camera lens for a new
    /// window size.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.context.resize(width, height);
        self.controller.resize(width, height);
        self.renderer.resize(&self.context.device, width, height);
    }

    /// Advance the orbit camera and the mesh spin by `dt` seconds and
    /// upload this frame's uniforms.
    pub fn update(&mut self, dt: f32) {
        self.controller.update();
        self.renderer.update(
            &self.context.queue,
            dt,
            &self.controller.camera,
            &self.options.lighting,
            &self.options.scene,
        );
    }

    /// Render one frame into the next swapchain texture.
    ///
    /// # Errors
    ///
    /// Returns [`wgpu::SurfaceError`] when the surface is lost, outdated,
    /// or timed out; the host resizes and retries on the next redraw.
    pub fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        let frame = self.context.get_next_frame()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self.context.create_encoder();
        self.renderer
            .draw(&mut encoder, &view, self.options.scene.background);
        self.context.submit(encoder);
        frame.present();

        self.frame_timing.end_frame();
        Ok(())
    }
}
