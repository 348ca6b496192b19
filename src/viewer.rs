//! Standalone window backed by winit.
//!
//! ```no_run
//! # use tableau::Viewer;
//! Viewer::builder()
//!     .with_title("tableau")
//!     .build()
//!     .run()
//!     .unwrap();
//! ```

use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    event::{ElementState, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::PhysicalKey,
    window::{Window, WindowId},
};

use crate::{engine::SceneEngine, error::TableauError, options::Options};

// ── Builder ──────────────────────────────────────────────────────────────

/// Fluent builder for [`Viewer`].
pub struct ViewerBuilder {
    options: Option<Options>,
    title: Option<String>,
}

impl ViewerBuilder {
    fn new() -> Self {
        Self {
            options: None,
            title: None,
        }
    }

    /// Override the default options.
    #[must_use]
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = Some(options);
        self
    }

    /// Set the window title, overriding `options.window.title`.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Consume the builder and produce a [`Viewer`].
    #[must_use]
    pub fn build(self) -> Viewer {
        let mut options = self.options.unwrap_or_default();
        if let Some(title) = self.title {
            options.window.title = title;
        }
        Viewer { options }
    }
}

// ── Viewer ───────────────────────────────────────────────────────────────

/// A window showing the scene. Keys 1 and 2 start the camera paths; Escape
/// or Q quits.
pub struct Viewer {
    options: Options,
}

impl Viewer {
    /// Start a new builder.
    #[must_use]
    pub fn builder() -> ViewerBuilder {
        ViewerBuilder::new()
    }

    /// Open the window and run the event loop. Blocks until the window is
    /// closed or a quit key is pressed.
    ///
    /// # Errors
    ///
    /// Returns [`TableauError::Viewer`] if the event loop fails, or the
    /// engine's error if it could not start.
    pub fn run(self) -> Result<(), TableauError> {
        let event_loop =
            EventLoop::new().map_err(|e| TableauError::Viewer(e.to_string()))?;
        event_loop.set_control_flow(ControlFlow::Wait);

        let mut app = ViewerApp {
            window: None,
            engine: None,
            options: Some(self.options),
            startup_error: None,
        };

        event_loop
            .run_app(&mut app)
            .map_err(|e| TableauError::Viewer(e.to_string()))?;

        app.startup_error.map_or(Ok(()), Err)
    }
}

// ── Winit app ────────────────────────────────────────────────────────────

struct ViewerApp {
    window: Option<Arc<Window>>,
    engine: Option<SceneEngine>,
    /// Handed to the engine on first resume.
    options: Option<Options>,
    startup_error: Option<TableauError>,
}

impl ViewerApp {
    fn start(
        &mut self,
        event_loop: &ActiveEventLoop,
        options: Options,
    ) -> Result<(), TableauError> {
        let attrs = Window::default_attributes()
            .with_title(options.window.title.clone())
            .with_inner_size(winit::dpi::LogicalSize::new(
                options.window.width,
                options.window.height,
            ));
        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .map_err(|e| TableauError::Viewer(e.to_string()))?,
        );

        let size = window.inner_size();
        let engine = pollster::block_on(SceneEngine::new(
            window.clone(),
            (size.width.max(1), size.height.max(1)),
            options,
        ))?;

        window.request_redraw();
        self.window = Some(window);
        self.engine = Some(engine);
        Ok(())
    }

    fn redraw(&mut self) {
        let (Some(window), Some(engine)) = (&self.window, &mut self.engine)
        else {
            return;
        };

        let _ = engine.update();
        match engine.render() {
            Ok(()) => {}
            Err(TableauError::Surface(
                wgpu::SurfaceError::Outdated | wgpu::SurfaceError::Lost,
            )) => {
                let inner = window.inner_size();
                engine.resize(inner.width, inner.height);
            }
            Err(e) => log::error!("render error: {e}"),
        }

        if engine.is_animating() {
            window.request_redraw();
        }
    }
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let Some(options) = self.options.take() else {
            return;
        };
        if let Err(e) = self.start(event_loop, options) {
            log::error!("failed to start viewer: {e}");
            self.startup_error = Some(e);
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),

            WindowEvent::Resized(size) => {
                if let Some(engine) = &mut self.engine {
                    engine.resize(size.width, size.height);
                }
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }

            WindowEvent::RedrawRequested => self.redraw(),

            WindowEvent::KeyboardInput { event, .. } => {
                if event.state != ElementState::Pressed || event.repeat {
                    return;
                }
                let (Some(window), Some(engine)) =
                    (&self.window, &mut self.engine)
                else {
                    return;
                };
                if let PhysicalKey::Code(code) = event.physical_key {
                    let key = format!("{code:?}");
                    if engine.handle_key(&key).is_some() {
                        window.request_redraw();
                    }
                }
                if engine.quit_requested() {
                    event_loop.exit();
                }
            }

            _ => (),
        }
    }
}
