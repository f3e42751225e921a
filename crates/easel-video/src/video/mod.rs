//! The video subsystem.
//!
//! [`Video`] owns the context (settings, bounds, current scale, pending
//! resize) and the active backend surface. Host adapters call its entry points
//! from the event loop and drain [`Notification`]s afterwards.

mod applier;
mod context;
mod coordinator;
mod notify;

pub use context::ScaleSettings;
pub use notify::Notification;

use crate::backend::{select_backend, SurfaceHandle, SurfaceKind, SurfaceProvider};
use crate::coords::{Bounds, DesignMetrics, PresentedSize, Scale};
use crate::error::VideoError;
use crate::host::{DeferToken, Host};
use crate::options::VideoOptions;

use applier::ScaleApplier;
use context::VideoContext;
use coordinator::ResizeCoordinator;

/// Display surface of one window: backend, design resolution and scaling.
///
/// `'w` is the lifetime borrowed by the backend surface (the window for GPU
/// surfaces).
pub struct Video<'w> {
    ctx: VideoContext,
    surface: Box<dyn SurfaceHandle + 'w>,
}

impl<'w> Video<'w> {
    /// Validates `options`, selects a backend and performs the initial sizing.
    ///
    /// On success `VideoInit` is queued. Failures are logged and returned.
    pub fn init(
        options: &VideoOptions,
        provider: &dyn SurfaceProvider<'w>,
        host: &mut dyn Host,
    ) -> Result<Self, VideoError> {
        let result = Self::try_init(options, provider, host);
        if let Err(e) = &result {
            log::error!("video init failed: {e}");
        }
        result
    }

    fn try_init(
        options: &VideoOptions,
        provider: &dyn SurfaceProvider<'w>,
        host: &mut dyn Host,
    ) -> Result<Self, VideoError> {
        let design = DesignMetrics::new(options.width, options.height).ok_or(
            VideoError::InvalidDesignSize {
                width: options.width,
                height: options.height,
            },
        )?;

        let surface = select_backend(provider, options, design.surface_size())
            .map_err(VideoError::NoBackend)?;

        let ctx = VideoContext::new(
            design,
            Bounds::from_options(options.max_width, options.max_height),
            ScaleSettings::from_options(options),
        );

        let mut video = Self { ctx, surface };

        if video.ctx.settings.auto_scale {
            video.on_container_change(host, true);
        } else {
            video.ctx.set_pixel_ratio(host.pixel_ratio());
            let scale = video.ctx.settings.base_scale.times(video.ctx.pixel_ratio);
            ScaleApplier::apply(&mut video.ctx, video.surface.as_mut(), scale);
        }

        video.ctx.notify(Notification::VideoInit);
        log::info!(
            "video initialized: {}x{} design, {} backend, policy {}, auto scale {}",
            design.width(),
            design.height(),
            video.surface.kind(),
            video.ctx.settings.policy,
            video.ctx.settings.auto_scale
        );

        Ok(video)
    }

    // ── inbound notifications ─────────────────────────────────────────────

    /// Container size changed. `force` applies now instead of deferring.
    pub fn on_container_change(&mut self, host: &mut dyn Host, force: bool) {
        ResizeCoordinator::on_container_change(&mut self.ctx, self.surface.as_mut(), host, force);
    }

    pub fn on_resize(&mut self, host: &mut dyn Host) {
        self.on_container_change(host, false);
    }

    pub fn on_orientation_change(&mut self, host: &mut dyn Host) {
        self.on_container_change(host, false);
    }

    /// The display pixel ratio changed (e.g. the window moved to another monitor).
    pub fn on_pixel_ratio_change(&mut self, host: &mut dyn Host) {
        self.on_container_change(host, true);
    }

    /// The surface moved on screen without changing size.
    pub fn on_scroll(&mut self) {
        self.ctx.refresh_bounds(self.surface.as_mut());
    }

    /// Delivers a deferred callback scheduled through [`Host::defer`].
    ///
    /// Returns `true` if a scale was applied; stale tokens return `false`.
    pub fn on_deferred(&mut self, token: DeferToken) -> bool {
        ResizeCoordinator::fire(&mut self.ctx, self.surface.as_mut(), token)
    }

    // ── explicit calls ────────────────────────────────────────────────────

    /// Caps the usable container size and schedules a deferred resize.
    pub fn set_bounds(&mut self, host: &mut dyn Host, max_width: f64, max_height: f64) {
        ResizeCoordinator::set_bounds(
            &mut self.ctx,
            self.surface.as_mut(),
            host,
            Bounds::new(max_width, max_height),
        );
    }

    /// Sets a fixed scale and applies it immediately (pixel ratio included).
    ///
    /// Non-positive or non-finite factors are ignored.
    pub fn scale(&mut self, host: &mut dyn Host, x: f64, y: f64) {
        let base = Scale::new(x, y);
        if !base.is_valid() {
            log::warn!("ignoring invalid scale {x}x{y}");
            return;
        }

        self.ctx.settings.base_scale = base;
        self.ctx.set_pixel_ratio(host.pixel_ratio());
        ResizeCoordinator::cancel_pending(&mut self.ctx, host);

        let scale = base.times(self.ctx.pixel_ratio);
        ScaleApplier::apply(&mut self.ctx, self.surface.as_mut(), scale);
    }

    /// Takes every notification queued since the last drain.
    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        self.ctx.drain_notifications()
    }

    // ── accessors ─────────────────────────────────────────────────────────

    pub fn current_scale(&self) -> Scale {
        self.ctx.current_scale
    }

    pub fn presented_size(&self) -> PresentedSize {
        self.ctx.presented
    }

    pub fn design(&self) -> DesignMetrics {
        self.ctx.design
    }

    pub fn bounds(&self) -> Bounds {
        self.ctx.bounds
    }

    pub fn settings(&self) -> &ScaleSettings {
        &self.ctx.settings
    }

    pub fn pixel_ratio(&self) -> f64 {
        self.ctx.pixel_ratio
    }

    pub fn renderer_kind(&self) -> SurfaceKind {
        self.surface.kind()
    }

    pub fn is_resize_pending(&self) -> bool {
        self.ctx.pending.is_some()
    }

    pub fn surface(&self) -> &dyn SurfaceHandle {
        self.surface.as_ref()
    }

    pub fn surface_mut(&mut self) -> &mut dyn SurfaceHandle {
        self.surface.as_mut()
    }
}
