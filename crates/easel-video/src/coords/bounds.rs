use super::ContainerSize;

/// Optional upper clamps on the usable container size.
///
/// Unbounded axes are stored as `f64::INFINITY`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Bounds {
    pub max_width: f64,
    pub max_height: f64,
}

impl Bounds {
    pub const UNBOUNDED: Self = Self {
        max_width: f64::INFINITY,
        max_height: f64::INFINITY,
    };

    #[inline]
    pub const fn new(max_width: f64, max_height: f64) -> Self {
        Self { max_width, max_height }
    }

    /// Builds bounds from optional maxima, leaving missing axes unbounded.
    pub fn from_options(max_width: Option<f64>, max_height: Option<f64>) -> Self {
        Self {
            max_width: max_width.unwrap_or(f64::INFINITY),
            max_height: max_height.unwrap_or(f64::INFINITY),
        }
    }

    /// Caps each container axis at the matching maximum.
    ///
    /// A NaN maximum leaves the axis untouched (`f64::min` ignores NaN).
    #[inline]
    pub fn clamp(self, container: ContainerSize) -> ContainerSize {
        ContainerSize::new(
            container.width.min(self.max_width),
            container.height.min(self.max_height),
        )
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::UNBOUNDED
    }
}
