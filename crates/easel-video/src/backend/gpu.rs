use anyhow::{Context, Result};
use winit::window::Window;

use crate::coords::{PresentedSize, SurfaceSize};
use crate::options::VideoOptions;

use super::surface;
use super::{BlendMode, PresentationTarget, SurfaceHandle, SurfaceKind};

/// wgpu surface bound to a window.
///
/// Owns the adapter/device/queue and the surface configuration. The physical
/// size is the swapchain size; the presented size lives in the
/// [`PresentationTarget`].
pub struct GpuSurface<'w> {
    /// Window the surface presents into.
    window: &'w Window,

    /// Surface bound to the window.
    ///
    /// Surface lifetime is tied to the window; the window must outlive this value.
    surface: wgpu::Surface<'w>,

    adapter: wgpu::Adapter,
    device: wgpu::Device,
    queue: wgpu::Queue,

    /// Active surface configuration.
    config: wgpu::SurfaceConfiguration,

    target: PresentationTarget,
    anti_alias: bool,
    blend_mode: BlendMode,
}

impl<'w> GpuSurface<'w> {
    /// Checks whether a usable GPU adapter exists for `options`.
    ///
    /// With `fail_if_major_performance_caveat` set, CPU-emulated adapters
    /// count as unsupported.
    pub fn probe(options: &VideoOptions) -> bool {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: options.power_preference.into(),
            compatible_surface: None,
            force_fallback_adapter: false,
        }));

        match adapter {
            Ok(adapter) => {
                let info = adapter.get_info();
                log::debug!(
                    "gpu probe found {} ({:?}, {:?})",
                    info.name,
                    info.backend,
                    info.device_type
                );
                !has_major_performance_caveat(options, &info)
            }
            Err(e) => {
                log::debug!("gpu probe found no adapter: {e}");
                false
            }
        }
    }

    /// Creates a GPU surface of `size` physical pixels bound to `window`.
    ///
    /// Adapter/device acquisition is asynchronous under wgpu.
    pub async fn new(
        window: &'w Window,
        options: &VideoOptions,
        size: SurfaceSize,
    ) -> Result<Self> {
        anyhow::ensure!(!size.is_empty(), "requested surface has zero size");

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(window)
            .context("failed to create wgpu surface")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: options.power_preference.into(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("failed to find a suitable GPU adapter")?;

        let info = adapter.get_info();
        anyhow::ensure!(
            !has_major_performance_caveat(options, &info),
            "adapter {} is CPU-emulated",
            info.name
        );

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("easel-video device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                experimental_features: wgpu::ExperimentalFeatures::disabled(),
                memory_hints: wgpu::MemoryHints::Performance,
                trace: wgpu::Trace::Off,
            })
            .await
            .context("failed to create wgpu device/queue")?;

        let caps = surface.get_capabilities(&adapter);
        let format = surface::choose_surface_format(&caps).context("no supported surface formats")?;
        let alpha_mode = surface::choose_alpha_mode(&caps, options.transparent);
        let size = surface::clamp_to_limit(size, device.limits().max_texture_dimension_2d);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width,
            height: size.height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };

        surface.configure(&device, &config);

        let presented = PresentedSize::new(size.width as f64, size.height as f64);

        Ok(Self {
            window,
            surface,
            adapter,
            device,
            queue,
            config,
            target: PresentationTarget::new(presented),
            anti_alias: options.anti_alias,
            blend_mode: options.blend_mode,
        })
    }

    /// Returns the active surface format.
    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    pub fn adapter_info(&self) -> wgpu::AdapterInfo {
        self.adapter.get_info()
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    /// MSAA sample count pipelines should use for the current anti-alias setting.
    pub fn sample_count(&self) -> u32 {
        if self.anti_alias { 4 } else { 1 }
    }

    /// Blend state pipelines should use for the current blend mode.
    pub fn blend_state(&self) -> wgpu::BlendState {
        self.blend_mode.blend_state()
    }
}

impl SurfaceHandle for GpuSurface<'_> {
    fn kind(&self) -> SurfaceKind {
        SurfaceKind::Accelerated
    }

    /// wgpu does not accept a 0x0 configuration; such requests are dropped.
    fn resize(&mut self, size: SurfaceSize) {
        if size.is_empty() {
            return;
        }

        let size = surface::clamp_to_limit(size, self.device.limits().max_texture_dimension_2d);
        if size.width == self.config.width && size.height == self.config.height {
            return;
        }

        self.config.width = size.width;
        self.config.height = size.height;
        self.surface.configure(&self.device, &self.config);
    }

    fn update_bounds(&mut self) {
        let scale = self.window.scale_factor();
        let logical: winit::dpi::LogicalSize<f64> = self.window.inner_size().to_logical(scale);
        self.target
            .set_bounds(PresentedSize::new(logical.width, logical.height));
    }

    fn width(&self) -> u32 {
        self.config.width
    }

    fn height(&self) -> u32 {
        self.config.height
    }

    fn presentation_target(&self) -> &PresentationTarget {
        &self.target
    }

    fn presentation_target_mut(&mut self) -> &mut PresentationTarget {
        &mut self.target
    }

    fn set_anti_alias(&mut self, enabled: bool) {
        self.anti_alias = enabled;
    }

    fn set_blend_mode(&mut self, mode: BlendMode) {
        self.blend_mode = mode;
    }
}

/// Software-emulated adapters count as a major performance caveat.
fn has_major_performance_caveat(options: &VideoOptions, info: &wgpu::AdapterInfo) -> bool {
    options.fail_if_major_performance_caveat && info.device_type == wgpu::DeviceType::Cpu
}
