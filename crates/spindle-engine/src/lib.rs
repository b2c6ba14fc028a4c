//! Spindle engine crate.
//!
//! Owns the GPU runtime for the rotating-triangle demo: device and surface
//! setup, the fixed render pipeline, the transform uniform buffer and the
//! per-frame render cycle.

pub mod core;
pub mod device;
pub mod error;
pub mod logging;
pub mod render;
pub mod time;
pub mod transform;
pub mod window;

pub use error::{RenderError, Result};
