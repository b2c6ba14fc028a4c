/// Initialization parameters for the GPU layer.
///
/// Defaults describe the demo's surface contract: `Bgra8Unorm`, opaque alpha,
/// FIFO presentation.
#[derive(Debug, Clone)]
pub struct GpuInit {
    /// Backends the instance may select from.
    pub backends: wgpu::Backends,

    pub power_preference: wgpu::PowerPreference,

    /// Requested surface format.
    ///
    /// If the surface does not support it, the first supported format is used.
    pub surface_format: wgpu::TextureFormat,

    /// Requested alpha mode, with the same fallback rule as `surface_format`.
    pub alpha_mode: wgpu::CompositeAlphaMode,

    pub present_mode: wgpu::PresentMode,

    /// Required wgpu features. Empty keeps the demo portable.
    pub required_features: wgpu::Features,

    /// Limits requested from the adapter/device.
    pub required_limits: wgpu::Limits,

    /// Desired maximum frame latency for the surface (a hint).
    pub desired_maximum_frame_latency: u32,
}

impl Default for GpuInit {
    fn default() -> Self {
        Self {
            backends: wgpu::Backends::all(),
            power_preference: wgpu::PowerPreference::HighPerformance,
            surface_format: wgpu::TextureFormat::Bgra8Unorm,
            alpha_mode: wgpu::CompositeAlphaMode::Opaque,
            present_mode: wgpu::PresentMode::Fifo,
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::default(),
            desired_maximum_frame_latency: 2,
        }
    }
}
