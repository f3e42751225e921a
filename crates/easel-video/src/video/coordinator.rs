use crate::backend::SurfaceHandle;
use crate::coords::{Bounds, ContainerSize};
use crate::host::{DeferToken, Host};
use crate::policy::compute_scale;

use super::applier::ScaleApplier;
use super::context::{PendingResize, VideoContext};

/// Debounce/cancel/force logic between container changes and the applier.
///
/// States: idle (`ctx.pending == None`) and pending-deferred
/// (`ctx.pending == Some(token)`). At most one deferred resize is outstanding;
/// a newer request replaces an undelivered one.
pub(crate) struct ResizeCoordinator;

impl ResizeCoordinator {
    /// Reacts to a change of the container (resize, orientation, pixel ratio).
    pub fn on_container_change(
        ctx: &mut VideoContext,
        surface: &mut dyn SurfaceHandle,
        host: &mut dyn Host,
        force: bool,
    ) {
        ctx.set_pixel_ratio(host.pixel_ratio());

        if !ctx.settings.auto_scale {
            ctx.refresh_bounds(surface);
            return;
        }

        let container = Self::measure(ctx, host);
        let Some(outcome) = compute_scale(
            ctx.design,
            container,
            ctx.bounds,
            ctx.settings.policy,
            ctx.pixel_ratio,
        ) else {
            log::debug!(
                "degenerate container {:.1}x{:.1}, keeping scale {:?}",
                container.width,
                container.height,
                ctx.current_scale
            );
            Self::cancel_pending(ctx, host);
            return;
        };

        if surface.size() != outcome.surface {
            surface.resize(outcome.surface);
            let actual = surface.size();
            if actual != outcome.surface {
                log::debug!(
                    "{} surface capped at {}x{} (requested {}x{})",
                    surface.kind(),
                    actual.width,
                    actual.height,
                    outcome.surface.width,
                    outcome.surface.height
                );
            }
        }

        Self::cancel_pending(ctx, host);

        if force {
            ScaleApplier::apply(ctx, surface, outcome.scale);
        } else {
            let token = host.defer(ctx.settings.resize_delay);
            ctx.pending = Some(PendingResize {
                token,
                scale: outcome.scale,
            });
        }
    }

    /// Updates the bounds and schedules a non-forced resize.
    pub fn set_bounds(
        ctx: &mut VideoContext,
        surface: &mut dyn SurfaceHandle,
        host: &mut dyn Host,
        bounds: Bounds,
    ) {
        ctx.bounds = bounds;
        Self::on_container_change(ctx, surface, host, false);
    }

    /// Delivers a deferred callback. Stale tokens are ignored.
    ///
    /// Returns `true` if a scale was applied.
    pub fn fire(
        ctx: &mut VideoContext,
        surface: &mut dyn SurfaceHandle,
        token: DeferToken,
    ) -> bool {
        match ctx.pending {
            Some(pending) if pending.token == token => {
                ScaleApplier::apply(ctx, surface, pending.scale);
                true
            }
            _ => {
                log::trace!("ignoring stale resize token {token:?}");
                false
            }
        }
    }

    /// Cancels the outstanding deferred resize, if any.
    pub fn cancel_pending(ctx: &mut VideoContext, host: &mut dyn Host) {
        if let Some(pending) = ctx.pending.take() {
            host.cancel(pending.token);
        }
    }

    /// Parent container when configured and measurable, the viewport otherwise.
    fn measure(ctx: &VideoContext, host: &dyn Host) -> ContainerSize {
        if ctx.settings.use_container_rect {
            if let Some(parent) = host.parent_size().filter(|c| c.is_valid()) {
                return parent;
            }
        }
        host.viewport_size()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::SoftwareSurface;
    use crate::coords::{DesignMetrics, Scale, SurfaceSize};
    use crate::options::{AutoScale, VideoOptions};
    use crate::policy::ScalePolicy;
    use crate::testing::MockHost;
    use crate::video::context::ScaleSettings;
    use crate::video::Notification;

    fn setup(policy: ScalePolicy, auto: bool) -> (VideoContext, SoftwareSurface) {
        let mut options = VideoOptions::new(640, 480);
        options.auto_scale = AutoScale::Flag(auto);
        options.scale_method = policy;
        let ctx = VideoContext::new(
            DesignMetrics::new(640, 480).unwrap(),
            Bounds::UNBOUNDED,
            ScaleSettings::from_options(&options),
        );
        let surface = SoftwareSurface::new(SurfaceSize::new(640, 480), false).unwrap();
        (ctx, surface)
    }

    // ── forced / deferred ─────────────────────────────────────────────────

    #[test]
    fn forced_change_applies_immediately() {
        let (mut ctx, mut surface) = setup(ScalePolicy::Fit, true);
        let mut host = MockHost::new(1280.0, 960.0);

        ResizeCoordinator::on_container_change(&mut ctx, &mut surface, &mut host, true);

        assert_eq!(ctx.current_scale, Scale::uniform(2.0));
        assert!(ctx.pending.is_none());
        assert!(host.scheduled().is_empty());
        assert!(ctx.drain_notifications().contains(&Notification::Repaint));
    }

    #[test]
    fn unforced_change_waits_for_callback() {
        let (mut ctx, mut surface) = setup(ScalePolicy::Fit, true);
        let mut host = MockHost::new(1280.0, 960.0);

        ResizeCoordinator::on_container_change(&mut ctx, &mut surface, &mut host, false);
        assert_eq!(ctx.current_scale, Scale::IDENTITY);
        assert!(ctx.drain_notifications().is_empty());

        let token = host.last_scheduled().unwrap();
        assert!(ResizeCoordinator::fire(&mut ctx, &mut surface, token));
        assert_eq!(ctx.current_scale, Scale::uniform(2.0));
        assert!(ctx.pending.is_none());
    }

    #[test_log::test]
    fn last_request_wins() {
        let (mut ctx, mut surface) = setup(ScalePolicy::Fit, true);
        let mut host = MockHost::new(1280.0, 960.0);

        ResizeCoordinator::on_container_change(&mut ctx, &mut surface, &mut host, false);
        let first = host.last_scheduled().unwrap();

        host.set_viewport(320.0, 240.0);
        ResizeCoordinator::on_container_change(&mut ctx, &mut surface, &mut host, false);
        let second = host.last_scheduled().unwrap();

        assert_ne!(first, second);
        assert_eq!(host.cancelled(), &[first]);

        // A host that failed to cancel still delivers the stale token.
        assert!(!ResizeCoordinator::fire(&mut ctx, &mut surface, first));
        assert_eq!(ctx.current_scale, Scale::IDENTITY);

        assert!(ResizeCoordinator::fire(&mut ctx, &mut surface, second));
        assert_eq!(ctx.current_scale, Scale::uniform(0.5));

        let repaints = ctx
            .drain_notifications()
            .into_iter()
            .filter(|n| *n == Notification::Repaint)
            .count();
        assert_eq!(repaints, 1);
    }

    #[test]
    fn forced_change_cancels_pending() {
        let (mut ctx, mut surface) = setup(ScalePolicy::Fit, true);
        let mut host = MockHost::new(1280.0, 960.0);

        ResizeCoordinator::on_container_change(&mut ctx, &mut surface, &mut host, false);
        let pending = host.last_scheduled().unwrap();

        ResizeCoordinator::on_container_change(&mut ctx, &mut surface, &mut host, true);
        assert_eq!(host.cancelled(), &[pending]);
        assert!(!ResizeCoordinator::fire(&mut ctx, &mut surface, pending));
    }

    #[test]
    fn token_fires_only_once() {
        let (mut ctx, mut surface) = setup(ScalePolicy::Fit, true);
        let mut host = MockHost::new(1280.0, 960.0);

        ResizeCoordinator::on_container_change(&mut ctx, &mut surface, &mut host, false);
        let token = host.last_scheduled().unwrap();
        assert!(ResizeCoordinator::fire(&mut ctx, &mut surface, token));
        assert!(!ResizeCoordinator::fire(&mut ctx, &mut surface, token));
    }

    #[test]
    fn deferral_uses_configured_delay() {
        let (mut ctx, mut surface) = setup(ScalePolicy::Fit, true);
        ctx.settings.resize_delay = std::time::Duration::from_millis(42);
        let mut host = MockHost::new(1280.0, 960.0);

        ResizeCoordinator::on_container_change(&mut ctx, &mut surface, &mut host, false);
        assert_eq!(host.delays(), &[std::time::Duration::from_millis(42)]);
    }

    // ── auto scale off ────────────────────────────────────────────────────

    #[test]
    fn disabled_auto_scale_only_refreshes_bounds() {
        let (mut ctx, mut surface) = setup(ScalePolicy::Fit, false);
        let mut host = MockHost::new(1280.0, 960.0);

        ResizeCoordinator::on_container_change(&mut ctx, &mut surface, &mut host, true);
        assert_eq!(ctx.current_scale, Scale::IDENTITY);
        assert_eq!(ctx.drain_notifications(), vec![Notification::BoundsChanged]);
        assert!(host.scheduled().is_empty());
    }

    // ── geometry ──────────────────────────────────────────────────────────

    #[test_log::test]
    fn degenerate_container_keeps_previous_scale() {
        let (mut ctx, mut surface) = setup(ScalePolicy::Fit, true);
        let mut host = MockHost::new(1280.0, 960.0);
        ResizeCoordinator::on_container_change(&mut ctx, &mut surface, &mut host, true);
        ctx.drain_notifications();

        host.set_viewport(0.0, 960.0);
        ResizeCoordinator::on_container_change(&mut ctx, &mut surface, &mut host, true);
        ResizeCoordinator::on_container_change(&mut ctx, &mut surface, &mut host, false);

        assert_eq!(ctx.current_scale, Scale::uniform(2.0));
        assert!(ctx.drain_notifications().is_empty());
        assert!(host.scheduled().is_empty());
    }

    #[test_log::test]
    fn degenerate_request_supersedes_pending_resize() {
        let (mut ctx, mut surface) = setup(ScalePolicy::Fit, true);
        let mut host = MockHost::new(1280.0, 960.0);

        ResizeCoordinator::on_container_change(&mut ctx, &mut surface, &mut host, false);
        let first = host.last_scheduled().unwrap();

        // Minimized window: zero-width viewport.
        host.set_viewport(0.0, 960.0);
        ResizeCoordinator::on_container_change(&mut ctx, &mut surface, &mut host, false);

        assert_eq!(host.cancelled(), &[first]);
        assert!(ctx.pending.is_none());
        assert_eq!(host.scheduled().len(), 1);

        assert!(!ResizeCoordinator::fire(&mut ctx, &mut surface, first));
        assert_eq!(ctx.current_scale, Scale::IDENTITY);
        assert!(ctx.drain_notifications().is_empty());
    }

    #[test]
    fn oversized_flex_container_is_capped() {
        let (mut ctx, mut surface) = setup(ScalePolicy::Flex, true);
        let mut host = MockHost::new(20_000.0, 700.0);

        ResizeCoordinator::on_container_change(&mut ctx, &mut surface, &mut host, true);

        assert_eq!(
            surface.size(),
            SurfaceSize::new(SoftwareSurface::MAX_DIMENSION, 700)
        );
        assert_eq!(surface.pixels().len(), SoftwareSurface::MAX_DIMENSION as usize * 700);
        assert_eq!(ctx.current_scale, Scale::IDENTITY);
    }

    #[test]
    fn pixel_ratio_is_applied() {
        let (mut ctx, mut surface) = setup(ScalePolicy::Fit, true);
        let mut host = MockHost::new(640.0, 480.0).with_pixel_ratio(2.0);

        ResizeCoordinator::on_container_change(&mut ctx, &mut surface, &mut host, true);
        assert_eq!(ctx.current_scale, Scale::uniform(2.0));
        // Physical 640 * 2 / 2 = 640 logical pixels on screen.
        assert_eq!(ctx.presented.width, 640.0);
    }

    #[test]
    fn flex_resizes_surface_to_container() {
        let (mut ctx, mut surface) = setup(ScalePolicy::Flex, true);
        let mut host = MockHost::new(1000.0, 700.0);

        ResizeCoordinator::on_container_change(&mut ctx, &mut surface, &mut host, false);
        // Surface resize happens at request time; only the scale is deferred.
        assert_eq!(surface.size(), SurfaceSize::new(1000, 700));
        assert_eq!(ctx.current_scale, Scale::IDENTITY);
    }

    #[test]
    fn set_bounds_caps_width_and_defers() {
        let (mut ctx, mut surface) = setup(ScalePolicy::Stretch, true);
        let mut host = MockHost::new(1280.0, 960.0);

        let bounds = Bounds::new(640.0, f64::INFINITY);
        ResizeCoordinator::set_bounds(&mut ctx, &mut surface, &mut host, bounds);
        let token = host.last_scheduled().unwrap();
        ResizeCoordinator::fire(&mut ctx, &mut surface, token);
        assert_eq!(ctx.current_scale, Scale::new(1.0, 2.0));

        // Bounds keep applying to later container changes.
        host.set_viewport(1920.0, 480.0);
        ResizeCoordinator::on_container_change(&mut ctx, &mut surface, &mut host, true);
        assert_eq!(ctx.current_scale, Scale::new(1.0, 1.0));
    }

    #[test]
    fn parent_container_used_when_configured() {
        let (mut ctx, mut surface) = setup(ScalePolicy::Fit, true);
        ctx.settings.use_container_rect = true;
        let mut host = MockHost::new(1280.0, 960.0).with_parent(320.0, 240.0);

        ResizeCoordinator::on_container_change(&mut ctx, &mut surface, &mut host, true);
        assert_eq!(ctx.current_scale, Scale::uniform(0.5));
    }

    #[test]
    fn unmeasurable_parent_falls_back_to_viewport() {
        let (mut ctx, mut surface) = setup(ScalePolicy::Fit, true);
        ctx.settings.use_container_rect = true;
        let mut host = MockHost::new(1280.0, 960.0).with_parent(0.0, 0.0);

        ResizeCoordinator::on_container_change(&mut ctx, &mut surface, &mut host, true);
        assert_eq!(ctx.current_scale, Scale::uniform(2.0));
    }
}
