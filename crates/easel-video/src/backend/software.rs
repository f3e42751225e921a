use anyhow::Result;

use crate::coords::{PresentedSize, SurfaceSize};

use super::surface::clamp_to_limit;
use super::{BlendMode, PresentationTarget, SurfaceHandle, SurfaceKind};

const OPAQUE_BLACK: u32 = 0xFF00_0000;
const TRANSPARENT: u32 = 0x0000_0000;

/// CPU framebuffer surface (packed `0xAARRGGBB` pixels).
///
/// The software backend rasterizes into this buffer; the host copies
/// [`SoftwareSurface::pixel_bytes`] into whatever it presents with.
#[derive(Debug, Clone)]
pub struct SoftwareSurface {
    size: SurfaceSize,
    pixels: Vec<u32>,
    clear_value: u32,
    target: PresentationTarget,
    anti_alias: bool,
    blend_mode: BlendMode,
}

impl SoftwareSurface {
    /// Largest framebuffer axis; matches wgpu's default `max_texture_dimension_2d`.
    pub const MAX_DIMENSION: u32 = 8192;

    /// Allocates a framebuffer of `size`, capped at [`Self::MAX_DIMENSION`].
    /// Fails on a zero-sized request.
    pub fn new(size: SurfaceSize, transparent: bool) -> Result<Self> {
        anyhow::ensure!(
            !size.is_empty(),
            "software surface has zero size ({}x{})",
            size.width,
            size.height
        );
        let size = clamp_to_limit(size, Self::MAX_DIMENSION);

        let clear_value = if transparent { TRANSPARENT } else { OPAQUE_BLACK };
        let presented = PresentedSize::new(size.width as f64, size.height as f64);

        Ok(Self {
            size,
            pixels: vec![clear_value; size.area()],
            clear_value,
            target: PresentationTarget::new(presented),
            anti_alias: false,
            blend_mode: BlendMode::default(),
        })
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    /// Framebuffer as raw bytes, row-major, 4 bytes per pixel.
    pub fn pixel_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Row stride in bytes.
    pub fn stride(&self) -> usize {
        self.size.width as usize * std::mem::size_of::<u32>()
    }

    pub fn anti_alias(&self) -> bool {
        self.anti_alias
    }

    pub fn blend_mode(&self) -> BlendMode {
        self.blend_mode
    }
}

impl SurfaceHandle for SoftwareSurface {
    fn kind(&self) -> SurfaceKind {
        SurfaceKind::Software
    }

    fn resize(&mut self, size: SurfaceSize) {
        if size.is_empty() {
            return;
        }
        let size = clamp_to_limit(size, Self::MAX_DIMENSION);
        if size == self.size {
            return;
        }

        // Contents are not preserved across a resize; the next repaint redraws.
        self.size = size;
        self.pixels.clear();
        self.pixels.resize(size.area(), self.clear_value);
    }

    fn update_bounds(&mut self) {
        let presented = self.target.presented_size();
        self.target.set_bounds(presented);
    }

    fn width(&self) -> u32 {
        self.size.width
    }

    fn height(&self) -> u32 {
        self.size.height
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
