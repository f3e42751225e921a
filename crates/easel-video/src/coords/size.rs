/// Fixed logical resolution the content is authored against.
///
/// Both axes are strictly positive; the constructor refuses anything else so
/// `ratio()` is always finite.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct DesignMetrics {
    width: u32,
    height: u32,
}

impl DesignMetrics {
    pub fn new(width: u32, height: u32) -> Option<Self> {
        (width > 0 && height > 0).then_some(Self { width, height })
    }

    #[inline]
    pub fn width(self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(self) -> u32 {
        self.height
    }

    /// `width / height`.
    #[inline]
    pub fn ratio(self) -> f64 {
        self.width as f64 / self.height as f64
    }

    #[inline]
    pub fn surface_size(self) -> SurfaceSize {
        SurfaceSize::new(self.width, self.height)
    }
}

/// Available drawing area reported by the host, in logical pixels.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct ContainerSize {
    pub width: f64,
    pub height: f64,
}

impl ContainerSize {
    #[inline]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite()
    }
}

/// Physical size of a backend surface.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

impl SurfaceSize {
    #[inline]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Number of pixels covered by the surface.
    #[inline]
    pub fn area(self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// Size at which the surface is shown to the user, in logical pixels.
///
/// Equivalent to the CSS box of a canvas element: the physical surface is
/// stretched or shrunk to this size by the compositor.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct PresentedSize {
    pub width: f64,
    pub height: f64,
}

impl PresentedSize {
    #[inline]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn design_rejects_zero_axis() {
        assert!(DesignMetrics::new(0, 480).is_none());
        assert!(DesignMetrics::new(640, 0).is_none());
    }

    #[test]
    fn design_ratio() {
        let d = DesignMetrics::new(640, 480).unwrap();
        assert!((d.ratio() - 4.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn container_validity() {
        assert!(ContainerSize::new(1.0, 1.0).is_valid());
        assert!(!ContainerSize::new(0.0, 1.0).is_valid());
        assert!(!ContainerSize::new(1.0, f64::NAN).is_valid());
        assert!(!ContainerSize::new(f64::INFINITY, 1.0).is_valid());
    }
}
