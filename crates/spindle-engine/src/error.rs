use thiserror::Error;

/// Errors raised by the engine.
///
/// Startup errors (`DeviceUnavailable`, `PipelineBuildFailed`) end the session.
/// `SurfaceAcquisitionFailed` is per frame: the frame is skipped and the loop
/// keeps ticking.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("no compatible graphics device: {reason}")]
    DeviceUnavailable { reason: String },

    #[error("render pipeline build failed: {reason}")]
    PipelineBuildFailed { reason: String },

    #[error("surface texture acquisition failed: {0}")]
    SurfaceAcquisitionFailed(#[from] wgpu::SurfaceError),

    /// A uniform write that does not cover exactly one matrix slot.
    #[error("uniform write of {len} bytes at offset {offset} does not match a matrix slot")]
    BufferContractViolation { offset: u64, len: usize },
}

impl RenderError {
    pub(crate) fn device_unavailable(reason: impl Into<String>) -> Self {
        Self::DeviceUnavailable {
            reason: reason.into(),
        }
    }

    pub(crate) fn pipeline_build_failed(reason: impl Into<String>) -> Self {
        Self::PipelineBuildFailed {
            reason: reason.into(),
        }
    }

    /// Returns `true` for errors that only affect the current frame.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::SurfaceAcquisitionFailed(_))
    }
}

pub type Result<T, E = RenderError> = std::result::Result<T, E>;
