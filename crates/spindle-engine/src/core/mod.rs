//! Session orchestration.
//!
//! `RenderSession` is the single owner of every GPU object the demo creates
//! and the target of the host's per-frame tick.

mod session;

pub use session::{RenderSession, SessionConfig};
