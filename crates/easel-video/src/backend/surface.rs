use crate::coords::SurfaceSize;

pub(crate) fn choose_surface_format(
    caps: &wgpu::SurfaceCapabilities,
) -> Option<wgpu::TextureFormat> {
    let preferred = [
        wgpu::TextureFormat::Bgra8UnormSrgb,
        wgpu::TextureFormat::Rgba8UnormSrgb,
    ];

    preferred
        .into_iter()
        .find(|f| caps.formats.contains(f))
        .or_else(|| caps.formats.first().copied())
}

/// Transparent surfaces want a premultiplied (or at least non-opaque) alpha
/// mode; everything else composites opaque.
pub(crate) fn choose_alpha_mode(
    caps: &wgpu::SurfaceCapabilities,
    transparent: bool,
) -> wgpu::CompositeAlphaMode {
    let wanted: &[wgpu::CompositeAlphaMode] = if transparent {
        &[
            wgpu::CompositeAlphaMode::PreMultiplied,
            wgpu::CompositeAlphaMode::PostMultiplied,
            wgpu::CompositeAlphaMode::Inherit,
        ]
    } else {
        &[wgpu::CompositeAlphaMode::Opaque]
    };

    wanted
        .iter()
        .copied()
        .find(|m| caps.alpha_modes.contains(m))
        .or_else(|| caps.alpha_modes.first().copied())
        .unwrap_or(wgpu::CompositeAlphaMode::Auto)
}

/// Caps a requested size at the device texture limit, keeping each axis >= 1.
pub(crate) fn clamp_to_limit(size: SurfaceSize, max_dimension: u32) -> SurfaceSize {
    SurfaceSize::new(
        size.width.clamp(1, max_dimension.max(1)),
        size.height.clamp(1, max_dimension.max(1)),
    )
}
