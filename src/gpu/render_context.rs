use std::fmt;

/// Why the window could not be given a GPU device.
#[derive(Debug)]
pub enum GpuInitError {
    /// The window handle could not back a wgpu surface.
    Surface(wgpu::CreateSurfaceError),
    /// No adapter can present to the surface.
    Adapter(wgpu::RequestAdapterError),
    /// The adapter refused the requested limits.
    Device(wgpu::RequestDeviceError),
    /// The surface reports no texture format the adapter can render to.
    NoSurfaceFormat,
}

impl fmt::Display for GpuInitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Surface(e) => write!(f, "cannot create surface: {e}"),
            Self::Adapter(e) => write!(f, "no usable GPU adapter: {e}"),
            Self::Device(e) => write!(f, "GPU device rejected: {e}"),
            Self::NoSurfaceFormat => {
                write!(f, "surface offers no renderable texture format")
            }
        }
    }
}

impl std::error::Error for GpuInitError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Surface(e) => Some(e),
            Self::Adapter(e) => Some(e),
            Self::Device(e) => Some(e),
            Self::NoSurfaceFormat => None,
        }
    }
}

/// Pick the swapchain format: the first sRGB one, else whatever comes first.
fn preferred_format(
    formats: &[wgpu::TextureFormat],
) -> Option<wgpu::TextureFormat> {
    formats
        .iter()
        .copied()
        .find(wgpu::TextureFormat::is_srgb)
        .or_else(|| formats.first().copied())
}

/// Device, queue and the window surface the scene is presented to.
pub struct RenderContext {
    /// Logical device.
    pub device: wgpu::Device,
    /// Submission queue.
    pub queue: wgpu::Queue,
    /// Presentation surface.
    pub surface: wgpu::Surface<'static>,
    /// Surface format, size and present mode.
    pub config: wgpu::SurfaceConfiguration,
}

impl RenderContext {
    /// Open a device that can present to `window` and configure the surface
    /// at `size` (zero dimensions are raised to one).
    ///
    /// # Errors
    ///
    /// Returns [`GpuInitError`] naming the step that failed.
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        size: (u32, u32),
    ) -> Result<Self, GpuInitError> {
        let instance = wgpu::Instance::default();
        let surface = instance
            .create_surface(window)
            .map_err(GpuInitError::Surface)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                compatible_surface: Some(&surface),
                ..Default::default()
            })
            .await
            .map_err(GpuInitError::Adapter)?;
        let info = adapter.get_info();
        log::info!("adapter: {} on {:?}", info.name, info.backend);

        // The scene needs nothing beyond downlevel limits.
        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("tableau device"),
                required_limits: wgpu::Limits::downlevel_defaults()
                    .using_resolution(adapter.limits()),
                ..Default::default()
            })
            .await
            .map_err(GpuInitError::Device)?;

        let caps = surface.get_capabilities(&adapter);
        let format = preferred_format(&caps.formats)
            .ok_or(GpuInitError::NoSurfaceFormat)?;
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.0.max(1),
            height: size.1.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            desired_maximum_frame_latency: 2,
            alpha_mode: caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: Vec::new(),
        };
        surface.configure(&device, &config);
        log::debug!("surface {format:?} {}x{}", config.width, config.height);

        Ok(Self {
            device,
            queue,
            surface,
            config,
        })
    }

    /// Swapchain texture format.
    pub fn format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    /// Current surface size in physical pixels.
    pub fn size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    /// Reconfigure for a new window size. Returns `false` and leaves the
    /// surface alone for a zero-sized (minimised) window.
    pub fn resize(&mut self, width: u32, height: u32) -> bool {
        if width == 0 || height == 0 {
            return false;
        }
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
        true
    }

    /// Next swapchain texture plus a default view of it.
    ///
    /// # Errors
    ///
    /// Returns [`wgpu::SurfaceError`]; `Outdated` and `Lost` are cured by a
    /// [`resize`](Self::resize).
    pub fn acquire_frame(
        &self,
    ) -> Result<(wgpu::SurfaceTexture, wgpu::TextureView), wgpu::SurfaceError>
    {
        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        Ok((frame, view))
    }
}
