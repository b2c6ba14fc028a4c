//! GPU device + surface management.
//!
//! This module is responsible for:
//! - acquiring the wgpu Adapter/Device/Queue
//! - creating & configuring the Surface with the demo's fixed format
//! - acquiring frames and mapping acquisition failures to frame actions

mod error;
mod frame;
mod gpu;
mod init;
mod surface;

pub use error::SurfaceErrorAction;
pub use frame::GpuFrame;
pub use gpu::{request_device, Gpu};
pub use init::GpuInit;

#[cfg(test)]
pub(crate) use gpu::test_device;
