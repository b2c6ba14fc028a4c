//! Window + runtime loop.
//!
//! Owns the `winit` EventLoop and the demo window, and drives one
//! `RenderSession::tick` per redraw.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig};
