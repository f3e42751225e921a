use anyhow::{Context, Result};

use crate::coords::SurfaceSize;
use crate::options::{RendererChoice, VideoOptions};

use super::SurfaceHandle;

/// Constructs backend surfaces for the selector.
///
/// `'w` is the lifetime of whatever the surfaces borrow (usually the window).
pub trait SurfaceProvider<'w> {
    /// Cheap capability check run before any GPU construction is attempted.
    fn supports_accelerated(&self, options: &VideoOptions) -> bool;

    fn create_accelerated(
        &self,
        options: &VideoOptions,
        size: SurfaceSize,
    ) -> Result<Box<dyn SurfaceHandle + 'w>>;

    fn create_software(
        &self,
        options: &VideoOptions,
        size: SurfaceSize,
    ) -> Result<Box<dyn SurfaceHandle + 'w>>;
}

/// Picks and constructs exactly one backend surface.
///
/// GPU is tried for `Auto` and `Accelerated` when the probe passes; a negative
/// probe or a construction error falls through to software. `Software` skips
/// the GPU entirely. Only a software construction failure is returned.
pub fn select_backend<'w>(
    provider: &dyn SurfaceProvider<'w>,
    options: &VideoOptions,
    size: SurfaceSize,
) -> Result<Box<dyn SurfaceHandle + 'w>> {
    if options.renderer != RendererChoice::Software {
        if provider.supports_accelerated(options) {
            match provider.create_accelerated(options, size) {
                Ok(surface) => {
                    log::info!("using accelerated backend ({}x{})", size.width, size.height);
                    return Ok(surface);
                }
                Err(e) => log::warn!("accelerated backend failed, falling back to software: {e:#}"),
            }
        } else {
            log::info!("accelerated backend unsupported, using software");
        }
    }

    let surface = provider
        .create_software(options, size)
        .context("software backend construction failed")?;

    log::info!("using software backend ({}x{})", size.width, size.height);
    Ok(surface)
}
