/// Per-axis scale factor applied to the surface when it is presented.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Scale {
    pub x: f64,
    pub y: f64,
}

impl Scale {
    pub const IDENTITY: Self = Self { x: 1.0, y: 1.0 };

    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    pub const fn uniform(s: f64) -> Self {
        Self { x: s, y: s }
    }

    /// Multiplies both axes by `factor` (used for pixel-ratio correction).
    #[inline]
    pub fn times(self, factor: f64) -> Self {
        Self::new(self.x * factor, self.y * factor)
    }

    /// Scale factors must be positive and finite to be applied.
    #[inline]
    pub fn is_valid(self) -> bool {
        self.x > 0.0 && self.y > 0.0 && self.x.is_finite() && self.y.is_finite()
    }
}

impl Default for Scale {
    fn default() -> Self {
        Self::IDENTITY
    }
}
