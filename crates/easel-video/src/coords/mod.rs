//! Size and scale types shared by the sizing policy, the coordinator and the
//! backends.
//!
//! Two spaces are in play:
//! - logical pixels (container sizes, presented sizes, bounds)
//! - physical surface pixels (`SurfaceSize`, always whole numbers)

mod bounds;
mod scale;
mod size;

pub use bounds::Bounds;
pub use scale::Scale;
pub use size::{ContainerSize, DesignMetrics, PresentedSize, SurfaceSize};

/// Rounds a non-negative pixel count to the nearest integer, halves going up.
#[inline]
pub(crate) fn round_half_up(value: f64) -> u32 {
    (value + 0.5).floor() as u32
}
