use anyhow::Result;
use winit::window::Window;

use crate::coords::SurfaceSize;
use crate::options::VideoOptions;

use super::{GpuSurface, SoftwareSurface, SurfaceHandle, SurfaceProvider};

/// Builds surfaces for a winit window: wgpu for the accelerated backend, a
/// CPU framebuffer for the software one.
#[derive(Debug, Copy, Clone)]
pub struct WindowSurfaceProvider<'w> {
    window: &'w Window,
}

impl<'w> WindowSurfaceProvider<'w> {
    pub fn new(window: &'w Window) -> Self {
        Self { window }
    }
}

impl<'w> SurfaceProvider<'w> for WindowSurfaceProvider<'w> {
    fn supports_accelerated(&self, options: &VideoOptions) -> bool {
        GpuSurface::probe(options)
    }

    fn create_accelerated(
        &self,
        options: &VideoOptions,
        size: SurfaceSize,
    ) -> Result<Box<dyn SurfaceHandle + 'w>> {
        let surface = pollster::block_on(GpuSurface::new(self.window, options, size))?;
        Ok(Box::new(surface))
    }

    fn create_software(
        &self,
        options: &VideoOptions,
        size: SurfaceSize,
    ) -> Result<Box<dyn SurfaceHandle + 'w>> {
        Ok(Box::new(SoftwareSurface::new(size, options.transparent)?))
    }
}
