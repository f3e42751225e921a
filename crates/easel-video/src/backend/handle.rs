use crate::coords::{PresentedSize, SurfaceSize};

use super::BlendMode;

/// Which kind of backend produced a surface.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum SurfaceKind {
    Accelerated,
    Software,
}

impl std::fmt::Display for SurfaceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Accelerated => f.write_str("accelerated"),
            Self::Software => f.write_str("software"),
        }
    }
}

/// Presentation state of a surface: the logical size it is shown at, and the
/// bounds last published to the host.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct PresentationTarget {
    presented: PresentedSize,
    bounds: PresentedSize,
}

impl PresentationTarget {
    pub fn new(presented: PresentedSize) -> Self {
        Self { presented, bounds: presented }
    }

    #[inline]
    pub fn presented_size(&self) -> PresentedSize {
        self.presented
    }

    #[inline]
    pub fn set_presented_size(&mut self, size: PresentedSize) {
        self.presented = size;
    }

    /// Bounds captured at the last `update_bounds` call.
    #[inline]
    pub fn bounds(&self) -> PresentedSize {
        self.bounds
    }

    #[inline]
    pub fn set_bounds(&mut self, bounds: PresentedSize) {
        self.bounds = bounds;
    }
}

/// Capabilities the video core needs from a backend surface.
///
/// The core resizes and scales the surface but never draws into it.
pub trait SurfaceHandle {
    fn kind(&self) -> SurfaceKind;

    /// Resizes the physical surface. Zero-sized requests are ignored.
    fn resize(&mut self, size: SurfaceSize);

    /// Re-reads the on-screen bounds of the surface.
    fn update_bounds(&mut self);

    fn width(&self) -> u32;

    fn height(&self) -> u32;

    fn size(&self) -> SurfaceSize {
        SurfaceSize::new(self.width(), self.height())
    }

    fn presentation_target(&self) -> &PresentationTarget;

    fn presentation_target_mut(&mut self) -> &mut PresentationTarget;

    fn set_anti_alias(&mut self, enabled: bool);

    fn set_blend_mode(&mut self, mode: BlendMode);
}
