//! Frame timing.
//!
//! One `FrameClock` per render session; `tick()` once per frame yields the
//! clamped delta used to advance the rotation.

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};
