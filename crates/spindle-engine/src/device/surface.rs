use winit::dpi::PhysicalSize;

use super::SurfaceErrorAction;

/// Picks `requested` if the surface supports it.
///
/// Otherwise prefers the other 8-bit linear unorm layout, then the first
/// supported format.
pub(crate) fn choose_surface_format(
    formats: &[wgpu::TextureFormat],
    requested: wgpu::TextureFormat,
) -> Option<wgpu::TextureFormat> {
    use wgpu::TextureFormat::{Bgra8Unorm, Rgba8Unorm};

    if formats.contains(&requested) {
        return Some(requested);
    }

    let equivalent = match requested {
        Bgra8Unorm => Some(Rgba8Unorm),
        Rgba8Unorm => Some(Bgra8Unorm),
        _ => None,
    };

    let fallback = equivalent
        .filter(|f| formats.contains(f))
        .or_else(|| formats.first().copied())?;
    log::warn!("surface does not support {requested:?}; using {fallback:?}");
    Some(fallback)
}

pub(crate) fn choose_alpha_mode(
    modes: &[wgpu::CompositeAlphaMode],
    requested: wgpu::CompositeAlphaMode,
) -> wgpu::CompositeAlphaMode {
    if modes.contains(&requested) {
        return requested;
    }

    let fallback = modes
        .first()
        .copied()
        .unwrap_or(wgpu::CompositeAlphaMode::Auto);
    log::warn!("surface does not support alpha mode {requested:?}; using {fallback:?}");
    fallback
}

/// Applies a new drawable size.
///
/// wgpu cannot configure a 0x0 surface (minimized window); configuration is
/// deferred until a non-zero size arrives.
pub(crate) fn apply_resize(
    surface: &wgpu::Surface,
    device: &wgpu::Device,
    config: &mut wgpu::SurfaceConfiguration,
    size: &mut PhysicalSize<u32>,
    new_size: PhysicalSize<u32>,
) {
    *size = new_size;
    if new_size.width == 0 || new_size.height == 0 {
        return;
    }

    config.width = new_size.width;
    config.height = new_size.height;
    surface.configure(device, config);
}

pub(crate) fn recover_surface_error(
    surface: &wgpu::Surface,
    device: &wgpu::Device,
    config: &wgpu::SurfaceConfiguration,
    size: PhysicalSize<u32>,
    err: &wgpu::SurfaceError,
) -> SurfaceErrorAction {
    let action = recovery_action(err, size);
    if action == SurfaceErrorAction::Reconfigured {
        surface.configure(device, config);
    }
    action
}

/// A lost or outdated surface is only reconfigured at a non-zero size;
/// while minimized the frame is skipped instead.
fn recovery_action(err: &wgpu::SurfaceError, size: PhysicalSize<u32>) -> SurfaceErrorAction {
    match SurfaceErrorAction::classify(err) {
        SurfaceErrorAction::Reconfigured if size.width == 0 || size.height == 0 => {
            SurfaceErrorAction::SkipFrame
        }
        action => action,
    }
}
