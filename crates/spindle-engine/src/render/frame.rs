use glam::Mat4;

use crate::device::SurfaceErrorAction;
use crate::error::{RenderError, Result};
use crate::transform::{model_at, Camera};

use super::uniform::{MatrixSlot, UniformBlock};

/// The GPU-facing half of a frame.
///
/// `FrameRenderer` decides what to write and when; the backend owns the
/// device, surface and encoders. Tests swap in a fake surface here.
pub trait FrameBackend {
    type Frame;

    /// Writes one uniform slot (`offset` ∈ {0, 64, 128}, 64 bytes).
    fn write_uniform(&mut self, offset: u64, bytes: &[u8]) -> Result<()>;

    fn acquire(&mut self) -> std::result::Result<Self::Frame, wgpu::SurfaceError>;

    /// Repairs the surface if possible after a failed `acquire`.
    fn recover(&mut self, err: &wgpu::SurfaceError) -> SurfaceErrorAction;

    /// Records the clear + draw into `frame`, submits and presents it.
    fn record_and_submit(&mut self, frame: Self::Frame, clear: wgpu::Color);
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum FramePhase {
    Idle,
    Recording,
    Submitted,
}

/// Result of one tick.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum FrameOutcome {
    Presented,
    /// Nothing presented this tick; the next tick proceeds normally.
    Skipped,
    /// The surface cannot recover (out of memory).
    Fatal,
}

/// Rotation clock. `t` only ever grows.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct FrameState {
    t: f64,
}

impl FrameState {
    /// Current rotation angle in radians.
    pub fn t(&self) -> f64 {
        self.t
    }

    pub fn advance(&mut self, delta: f64) {
        if delta.is_finite() && delta > 0.0 {
            self.t += delta;
        }
    }
}

/// Drives the per-frame cycle: matrices, uniform upload, one draw, submit.
pub struct FrameRenderer {
    view: Mat4,
    projection: Mat4,
    clear: wgpu::Color,
    rotation_speed: f64,

    state: FrameState,
    phase: FramePhase,

    presented: u64,
    skipped: u64,
}

impl FrameRenderer {
    /// `rotation_speed` is in radians per second.
    pub fn new(camera: &Camera, clear: wgpu::Color, rotation_speed: f32) -> Self {
        Self {
            view: camera.view(),
            projection: camera.projection(),
            clear,
            rotation_speed: rotation_speed as f64,
            state: FrameState::default(),
            phase: FramePhase::Idle,
            presented: 0,
            skipped: 0,
        }
    }

    pub fn state(&self) -> FrameState {
        self.state
    }

    pub fn phase(&self) -> FramePhase {
        self.phase
    }

    pub fn frames_presented(&self) -> u64 {
        self.presented
    }

    pub fn frames_skipped(&self) -> u64 {
        self.skipped
    }

    /// The uniform contents for the current `t`.
    pub fn uniforms(&self) -> UniformBlock {
        UniformBlock::from_matrices(model_at(self.state.t()), self.view, self.projection)
    }

    /// Renders one frame, then advances `t` by `dt` seconds of rotation.
    ///
    /// Surface failures never escape: they are logged and reported as
    /// `Skipped` (or `Fatal` when the surface is out of memory).
    pub fn render<B: FrameBackend>(&mut self, backend: &mut B, dt: f32) -> FrameOutcome {
        debug_assert_eq!(self.phase, FramePhase::Idle);

        let outcome = self.run_frame(backend);
        self.set_phase(FramePhase::Idle);

        match outcome {
            FrameOutcome::Presented => self.presented += 1,
            FrameOutcome::Skipped => self.skipped += 1,
            FrameOutcome::Fatal => {}
        }

        self.state.advance(dt as f64 * self.rotation_speed);
        outcome
    }

    fn run_frame<B: FrameBackend>(&mut self, backend: &mut B) -> FrameOutcome {
        let block = self.uniforms();
        for slot in MatrixSlot::ALL {
            if let Err(err) = backend.write_uniform(slot.offset(), block.slot_bytes(slot)) {
                log::error!("uniform upload rejected: {err}");
                return FrameOutcome::Skipped;
            }
        }

        let frame = match backend.acquire() {
            Ok(frame) => frame,
            Err(err) => {
                let action = backend.recover(&err);
                let err = RenderError::from(err);
                if action == SurfaceErrorAction::Fatal {
                    log::error!("{err}; stopping render loop");
                    return FrameOutcome::Fatal;
                }
                log::warn!("{err}; skipping frame ({action:?})");
                return FrameOutcome::Skipped;
            }
        };

        self.set_phase(FramePhase::Recording);
        backend.record_and_submit(frame, self.clear);
        self.set_phase(FramePhase::Submitted);

        FrameOutcome::Presented
    }

    fn set_phase(&mut self, phase: FramePhase) {
        log::trace!("frame phase {:?} -> {phase:?}", self.phase);
        self.phase = phase;
    }
}
