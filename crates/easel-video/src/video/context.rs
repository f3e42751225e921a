use std::time::Duration;

use crate::backend::{BlendMode, SurfaceHandle};
use crate::coords::{Bounds, DesignMetrics, PresentedSize, Scale};
use crate::host::DeferToken;
use crate::options::VideoOptions;
use crate::policy::ScalePolicy;

use super::Notification;

/// Scaling behaviour fixed at init; only explicit scale calls change it.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ScaleSettings {
    pub auto_scale: bool,
    pub policy: ScalePolicy,
    /// Scale used when auto scaling is off (before pixel-ratio correction).
    pub base_scale: Scale,
    pub use_container_rect: bool,
    pub anti_alias: bool,
    pub blend_mode: BlendMode,
    /// Delay handed to the host for non-forced resizes.
    pub resize_delay: Duration,
}

impl ScaleSettings {
    pub fn from_options(options: &VideoOptions) -> Self {
        Self {
            auto_scale: options.auto_scale_enabled(),
            policy: options.scale_method,
            base_scale: Scale::uniform(options.base_scale()),
            use_container_rect: options.use_container_rect_for_sizing,
            anti_alias: options.anti_alias,
            blend_mode: options.blend_mode,
            resize_delay: options.resize_delay(),
        }
    }
}

/// A computed scale waiting for its deferred callback.
#[derive(Debug, Copy, Clone, PartialEq)]
pub(crate) struct PendingResize {
    pub token: DeferToken,
    pub scale: Scale,
}

/// Mutable state shared by the coordinator and the applier.
///
/// Owned by a single [`super::Video`]; never shared across threads.
#[derive(Debug)]
pub(crate) struct VideoContext {
    pub design: DesignMetrics,
    pub bounds: Bounds,
    pub settings: ScaleSettings,
    pub pixel_ratio: f64,
    pub current_scale: Scale,
    pub presented: PresentedSize,
    pub pending: Option<PendingResize>,
    notifications: Vec<Notification>,
}

impl VideoContext {
    pub fn new(design: DesignMetrics, bounds: Bounds, settings: ScaleSettings) -> Self {
        Self {
            design,
            bounds,
            settings,
            pixel_ratio: 1.0,
            current_scale: Scale::IDENTITY,
            presented: PresentedSize::new(design.width() as f64, design.height() as f64),
            pending: None,
            notifications: Vec::new(),
        }
    }

    /// Stores a host-reported pixel ratio; unusable values count as 1.
    pub fn set_pixel_ratio(&mut self, ratio: f64) {
        self.pixel_ratio = if ratio > 0.0 && ratio.is_finite() { ratio } else { 1.0 };
    }

    pub fn notify(&mut self, n: Notification) {
        self.notifications.push(n);
    }

    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    /// Asks the surface to re-read its bounds and acknowledges it outbound.
    pub fn refresh_bounds(&mut self, surface: &mut dyn SurfaceHandle) {
        surface.update_bounds();
        self.notify(Notification::BoundsChanged);
    }
}
