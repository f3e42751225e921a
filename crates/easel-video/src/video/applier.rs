use crate::backend::SurfaceHandle;
use crate::coords::{PresentedSize, Scale};

use super::context::VideoContext;
use super::Notification;

/// Pushes a scale onto the live surface.
pub(crate) struct ScaleApplier;

impl ScaleApplier {
    /// Applies `scale` (pixel ratio already included).
    ///
    /// Presented size is `physical * scale / pixel_ratio`. Anti-alias and blend
    /// settings are restored every time since some backend operations reset
    /// them. Queues a bounds acknowledgment and one repaint, then clears any
    /// pending-resize bookkeeping.
    pub fn apply(ctx: &mut VideoContext, surface: &mut dyn SurfaceHandle, scale: Scale) {
        debug_assert!(scale.is_valid(), "applying invalid scale {scale:?}");

        ctx.current_scale = scale;

        let presented = PresentedSize::new(
            surface.width() as f64 * scale.x / ctx.pixel_ratio,
            surface.height() as f64 * scale.y / ctx.pixel_ratio,
        );
        surface.presentation_target_mut().set_presented_size(presented);
        ctx.presented = presented;

        surface.set_anti_alias(ctx.settings.anti_alias);
        surface.set_blend_mode(ctx.settings.blend_mode);

        ctx.refresh_bounds(surface);
        ctx.notify(Notification::Repaint);
        ctx.pending = None;

        log::trace!(
            "applied scale {:.4}x{:.4}, presented {:.1}x{:.1}",
            scale.x,
            scale.y,
            presented.width,
            presented.height
        );
    }
}
