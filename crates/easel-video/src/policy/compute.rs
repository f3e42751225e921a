use crate::coords::{round_half_up, Bounds, ContainerSize, DesignMetrics, Scale, SurfaceSize};

use super::ScalePolicy;

/// Result of a sizing computation.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ScaleOutcome {
    /// Scale factors, pixel ratio already applied.
    pub scale: Scale,
    /// Physical size the surface should have.
    pub surface: SurfaceSize,
}

/// Computes scale factors and the target surface size.
///
/// Returns `None` when the clamped container is degenerate (a zero, negative or
/// non-finite axis) or when the result would not be a positive finite scale.
/// Callers keep their previous scale in that case.
pub fn compute_scale(
    design: DesignMetrics,
    container: ContainerSize,
    bounds: Bounds,
    policy: ScalePolicy,
    pixel_ratio: f64,
) -> Option<ScaleOutcome> {
    let clamped = bounds.clamp(container);
    if !clamped.is_valid() {
        return None;
    }

    let (cw, ch) = (clamped.width, clamped.height);
    let (dw, dh) = (design.width() as f64, design.height() as f64);
    let screen_ratio = cw / ch;
    let design_ratio = design.ratio();

    let (scale, surface) = match policy {
        ScalePolicy::FillMin
        | ScalePolicy::FillMax
        | ScalePolicy::FlexWidth
        | ScalePolicy::FlexHeight => {
            let grow_width = match policy {
                ScalePolicy::FillMin => screen_ratio > design_ratio,
                ScalePolicy::FillMax => screen_ratio < design_ratio,
                ScalePolicy::FlexWidth => true,
                _ => false,
            };

            if grow_width {
                let width = round_half_up(cw.min(dh * screen_ratio));
                if width == 0 {
                    return None;
                }
                (Scale::uniform(cw / width as f64), SurfaceSize::new(width, design.height()))
            } else {
                let height = round_half_up(ch.min(dw * (ch / cw)));
                if height == 0 {
                    return None;
                }
                (Scale::uniform(ch / height as f64), SurfaceSize::new(design.width(), height))
            }
        }

        ScalePolicy::Flex => {
            let surface = SurfaceSize::new(round_half_up(cw), round_half_up(ch));
            if surface.is_empty() {
                return None;
            }
            (Scale::IDENTITY, surface)
        }

        ScalePolicy::Stretch => (Scale::new(cw / dw, ch / dh), design.surface_size()),

        ScalePolicy::Fit => {
            let s = if screen_ratio < design_ratio { cw / dw } else { ch / dh };
            (Scale::uniform(s), design.surface_size())
        }
    };

    let scale = scale.times(pixel_ratio);
    scale.is_valid().then_some(ScaleOutcome { scale, surface })
}
