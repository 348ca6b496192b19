//! The scene engine: owns the GPU context, the scene and every subsystem
//! needed to draw it, and exposes a small frame API (`update`, `render`,
//! `resize`) to whatever drives the window.

mod input;
mod options;

use crate::{
    camera::{controller::CameraController, path::PathKind},
    error::TableauError,
    gpu::{
        lighting::Lighting, render_context::RenderContext,
        shader_composer::ShaderComposer, texture::DepthTarget,
    },
    options::Options,
    renderer::solid::SolidRenderer,
    scene::Scene,
    util::frame_timing::FrameTiming,
};

/// Renders the block-and-sphere scene into a window surface.
pub struct SceneEngine {
    context: RenderContext,
    depth: DepthTarget,
    camera_controller: CameraController,
    lighting: Lighting,
    solid: SolidRenderer,
    scene: Scene,
    options: Options,
    frame_timing: FrameTiming,
    quit_requested: bool,
}

impl SceneEngine {
    /// Create the engine for a window surface.
    ///
    /// # Errors
    ///
    /// Fails if no GPU device is available, the shaders do not compose, or
    /// the configured sphere tessellation is invalid.
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        size: (u32, u32),
        options: Options,
    ) -> Result<Self, TableauError> {
        let context = RenderContext::new(window, size).await?;
        let mut shader_composer = ShaderComposer::new()?;

        let (width, height) = context.size();
        let depth = DepthTarget::new(&context.device, width, height);
        let camera_controller =
            CameraController::new(&context, &options.camera, &options.projection);
        let lighting = Lighting::new(&context, &options.lighting);
        let mut solid = SolidRenderer::new(
            &context,
            &camera_controller.layout,
            &lighting.layout,
            &mut shader_composer,
        )?;

        let scene =
            Scene::new(options.display.sphere_slices, options.display.sphere_stacks);
        solid.sync_meshes(&context.device, &scene.meshes())?;
        log::info!(
            "scene ready: {} objects, {} meshes",
            scene.objects().len(),
            solid.mesh_count()
        );

        Ok(Self {
            context,
            depth,
            camera_controller,
            lighting,
            solid,
            scene,
            options,
            frame_timing: FrameTiming::new(),
            quit_requested: false,
        })
    }

    /// Start (or restart) a camera path.
    pub fn select_path(&mut self, kind: PathKind) {
        self.camera_controller.select_path(kind);
        // Time spent idle must not be replayed as path ticks.
        self.frame_timing.reset();
    }

    /// Advance the camera by the wall-clock time since the previous call.
    ///
    /// Returns `true` if the view changed.
    pub fn update(&mut self) -> bool {
        let was_animating = self.is_animating();
        let dt = self.frame_timing.tick();
        let moved = self.camera_controller.update(dt);
        if was_animating && !self.is_animating() {
            log::debug!("path done, {:.1} fps", self.frame_timing.fps());
        }
        moved
    }

    /// `true` while a camera path is still moving the eye.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.camera_controller.animator.is_animating()
    }

    /// `true` once a quit action has been executed.
    #[must_use]
    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    /// Smoothed frames per second.
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.frame_timing.fps()
    }

    /// The scene being drawn.
    #[must_use]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// The camera controller.
    #[must_use]
    pub fn camera(&self) -> &CameraController {
        &self.camera_controller
    }

    /// Draw one frame and present it.
    ///
    /// # Errors
    ///
    /// Returns [`TableauError::Surface`] when the swapchain cannot provide a
    /// frame; callers should resize on `Outdated` or `Lost`.
    pub fn render(&mut self) -> Result<(), TableauError> {
        self.prepare()?;

        let (frame, view) = self.context.acquire_frame()?;
        let encoder = self.encode(&view);
        let _ = self.context.queue.submit(std::iter::once(encoder.finish()));
        frame.present();
        Ok(())
    }

    /// Upload the camera uniform and this frame's instances.
    fn prepare(&mut self) -> Result<(), TableauError> {
        self.camera_controller
            .update_gpu(&self.context.queue, self.lighting.light_world);

        let view = self.camera_controller.animator.camera().view_matrix();
        let items = self.scene.draw_items(view)?;
        self.solid
            .prepare(&self.context.device, &self.context.queue, &items);
        Ok(())
    }

    fn encode(&self, target: &wgpu::TextureView) -> wgpu::CommandEncoder {
        let [r, g, b, a] = self.options.display.clear_color;
        let mut encoder = self.context.device.create_command_encoder(
            &wgpu::CommandEncoderDescriptor {
                label: Some("Scene Encoder"),
            },
        );
        {
            let mut render_pass =
                encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("Scene Pass"),
                    color_attachments: &[Some(
                        wgpu::RenderPassColorAttachment {
                            view: target,
                            resolve_target: None,
                            depth_slice: None,
                            ops: wgpu::Operations {
                                load: wgpu::LoadOp::Clear(wgpu::Color {
                                    r,
                                    g,
                                    b,
                                    a,
                                }),
                                store: wgpu::StoreOp::Store,
                            },
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
            self.solid.draw(
                &mut render_pass,
                &self.camera_controller.bind_group,
                &self.lighting.bind_group,
            );
        }
        encoder
    }

    /// Resize the surface, depth buffer and projection. Zero-sized
    /// dimensions (minimised windows) are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if !self.context.resize(width, height) {
            return;
        }
        self.depth = DepthTarget::new(&self.context.device, width, height);
        self.camera_controller.resize(width, height);
        log::debug!("resized to {width}x{height}");
    }
}
